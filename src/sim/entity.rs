//! Static map entities: blocks, collectible items and the goal flag

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Tile variants. All are solid; the variant only picks the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    TopLeft,
    TopMiddle,
    TopRight,
    EndRight,
    EndLeft,
    Top,
    Center,
    LoneFloat,
    Special,
}

impl BlockKind {
    pub fn code(&self) -> &'static str {
        match self {
            BlockKind::TopLeft => "TL",
            BlockKind::TopMiddle => "TM",
            BlockKind::TopRight => "TR",
            BlockKind::EndRight => "ER",
            BlockKind::EndLeft => "EL",
            BlockKind::Top => "TP",
            BlockKind::Center => "CN",
            BlockKind::LoneFloat => "LF",
            BlockKind::Special => "SP",
        }
    }
}

impl FromStr for BlockKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TL" => Ok(BlockKind::TopLeft),
            "TM" => Ok(BlockKind::TopMiddle),
            "TR" => Ok(BlockKind::TopRight),
            "ER" => Ok(BlockKind::EndRight),
            "EL" => Ok(BlockKind::EndLeft),
            "TP" => Ok(BlockKind::Top),
            "CN" => Ok(BlockKind::Center),
            "LF" => Ok(BlockKind::LoneFloat),
            "SP" => Ok(BlockKind::Special),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An immobile obstacle. Never moves, never destroyed mid-level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub aabb: Aabb,
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    Heart,
    OneUp,
    /// Level goal; touched, never consumed
    Flag,
}

impl FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Coin" => Ok(ItemKind::Coin),
            "Heart" => Ok(ItemKind::Heart),
            "OneUp" => Ok(ItemKind::OneUp),
            "Flag" => Ok(ItemKind::Flag),
            _ => Err(()),
        }
    }
}

/// A pickup sitting in the level until the hero touches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub aabb: Aabb,
}

/// The goal marker. Reaching it completes the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub aabb: Aabb,
}
