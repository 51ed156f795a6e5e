use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "worker_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    Mason,
    Carpenter,
    Electrician,
    Plumber,
    Painter,
    Welder,
    Laborer,
    Other,
}

impl WorkerRole {
    pub fn to_str(&self) -> &str {
        match self {
            WorkerRole::Mason => "mason",
            WorkerRole::Carpenter => "carpenter",
            WorkerRole::Electrician => "electrician",
            WorkerRole::Plumber => "plumber",
            WorkerRole::Painter => "painter",
            WorkerRole::Welder => "welder",
            WorkerRole::Laborer => "laborer",
            WorkerRole::Other => "other",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            WorkerRole::Laborer => "General Laborer",
            WorkerRole::Mason => "Mason",
            WorkerRole::Carpenter => "Carpenter",
            WorkerRole::Electrician => "Electrician",
            WorkerRole::Plumber => "Plumber",
            WorkerRole::Painter => "Painter",
            WorkerRole::Welder => "Welder",
            WorkerRole::Other => "Other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "worker_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Available,
    /// Shown to clients as "On Project".
    Busy,
    Inactive,
    OnLeave,
}

impl Default for WorkerStatus {
    fn default() -> Self {
        WorkerStatus::Available
    }
}

/// Trade skills a worker can list on their profile. Stored as the snake_case key.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Foundation,
    Framing,
    Finishing,
    Wiring,
    Plumbing,
    Painting,
    TileWork,
    Carpentry,
    Welding,
    Roofing,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::Foundation,
        Skill::Framing,
        Skill::Finishing,
        Skill::Wiring,
        Skill::Plumbing,
        Skill::Painting,
        Skill::TileWork,
        Skill::Carpentry,
        Skill::Welding,
        Skill::Roofing,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Skill::Foundation => "foundation",
            Skill::Framing => "framing",
            Skill::Finishing => "finishing",
            Skill::Wiring => "wiring",
            Skill::Plumbing => "plumbing",
            Skill::Painting => "painting",
            Skill::TileWork => "tile_work",
            Skill::Carpentry => "carpentry",
            Skill::Welding => "welding",
            Skill::Roofing => "roofing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Skill::Foundation => "Foundation Work",
            Skill::Framing => "Framing & Structure",
            Skill::Finishing => "Finishing & Details",
            Skill::Wiring => "Wiring & Installation",
            Skill::Plumbing => "Plumbing Work",
            Skill::Painting => "Painting & Decorating",
            Skill::TileWork => "Tile Work",
            Skill::Carpentry => "Carpentry",
            Skill::Welding => "Welding",
            Skill::Roofing => "Roofing",
        }
    }

    pub fn from_key(key: &str) -> Option<Skill> {
        Skill::ALL.iter().copied().find(|skill| skill.to_str() == key)
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Worker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub role: WorkerRole,
    pub daily_rate: BigDecimal,
    pub experience_years: i32,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub id_number: Option<String>,
    pub status: WorkerStatus,
    pub rating: f32,
    pub completed_projects: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a staff user edits on their own profile.
#[derive(Debug, Clone)]
pub struct WorkerProfileParams {
    pub name: String,
    pub phone: Option<String>,
    pub role: WorkerRole,
    pub daily_rate: BigDecimal,
    pub experience_years: i32,
    pub bio: Option<String>,
    pub skills: Vec<Skill>,
    pub status: WorkerStatus,
}

impl WorkerProfileParams {
    pub fn skill_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(self.skills.len());
        for skill in &self.skills {
            let key = skill.to_str().to_string();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_keys_round_trip_through_catalogue() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_key(skill.to_str()), Some(skill));
        }
        assert_eq!(Skill::from_key("juggling"), None);
    }

    #[test]
    fn test_skill_keys_are_deduplicated_in_order() {
        let params = WorkerProfileParams {
            name: "Amina".to_string(),
            phone: None,
            role: WorkerRole::Mason,
            daily_rate: BigDecimal::from(1500),
            experience_years: 4,
            bio: None,
            skills: vec![Skill::Foundation, Skill::TileWork, Skill::Foundation],
            status: WorkerStatus::Available,
        };
        assert_eq!(params.skill_keys(), vec!["foundation", "tile_work"]);
    }
}
