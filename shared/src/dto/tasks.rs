use serde::{Deserialize, Serialize};

/// Gamification task shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_xp")]
    pub xp: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

fn default_xp() -> u32 {
    10
}

fn default_category() -> String {
    "daily".to_string()
}

/// Accumulated user progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProgress {
    #[serde(default)]
    pub current_xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub hardware_wallet_progress: f64,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
}

fn default_level() -> u32 {
    1
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            current_xp: 0,
            level: default_level(),
            streak: 0,
            hardware_wallet_progress: 0.0,
            completed_tasks: Vec::new(),
        }
    }
}

impl UserProgress {
    /// Mark `task` complete and credit its XP. Returns `false` if it was already counted.
    pub fn complete(&mut self, task: &Task) -> bool {
        if self.completed_tasks.iter().any(|id| id == &task.id) {
            return false;
        }
        self.completed_tasks.push(task.id.clone());
        self.current_xp += task.xp;
        true
    }
}
