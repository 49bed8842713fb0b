use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueSettings {
    /// Group labels teams may be assigned to.
    pub groups: Vec<String>,
    /// Run the per-minute clock for live matches.
    #[serde(default = "default_clock_enabled")]
    pub clock_enabled: bool,
}

fn default_clock_enabled() -> bool {
    true
}

impl LeagueSettings {
    pub fn is_known_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            groups: ["A", "B", "C", "D"].iter().map(|g| g.to_string()).collect(),
            clock_enabled: true,
        }
    }
}
