use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: String,
    pub goals: u32,
    pub assists: u32,
    pub appearances: u32,
    pub position: String,
}
