// Source domain model - Which backend the grid is showing

/// The data sources the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Server-fleet monitor (M/Monit host list).
    Monitor,
    /// Continuous-integration server (Jenkins cc.xml).
    Builds,
}

impl SourceId {
    pub fn name(self) -> &'static str {
        match self {
            SourceId::Monitor => "mmonit",
            SourceId::Builds => "jenkins",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a scene button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    Show(SourceId),
    Blank,
}

impl SceneAction {
    /// Scene 1 shows hosts, scene 2 shows builds, scene 3 blanks the grid.
    pub fn from_scene(scene: u8) -> Option<Self> {
        match scene {
            1 => Some(SceneAction::Show(SourceId::Monitor)),
            2 => Some(SceneAction::Show(SourceId::Builds)),
            3 => Some(SceneAction::Blank),
            _ => None,
        }
    }

    pub fn target(self) -> Option<SourceId> {
        match self {
            SceneAction::Show(source) => Some(source),
            SceneAction::Blank => None,
        }
    }
}
