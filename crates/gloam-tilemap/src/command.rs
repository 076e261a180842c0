use std::fmt;

const NAMES: [&str; 3] = ["changeRegionLights", "ChangeRegionLights", "リージョン灯り変更"];

/// Script command that toggles region darkness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionLightsCommand {
    ChangeRegionLights { enabled: bool },
}

impl RegionLightsCommand {
    pub fn change(enabled: bool) -> Self {
        RegionLightsCommand::ChangeRegionLights { enabled }
    }

    /// Parse `<name> [arg]`. Returns `None` for other commands.
    ///
    /// Only the literal `true` enables; anything else, including a missing
    /// argument, disables.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let name = words.next()?;
        if !NAMES.contains(&name) {
            return None;
        }
        let enabled = words.next() == Some("true");
        Some(Self::change(enabled))
    }
}

impl fmt::Display for RegionLightsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionLightsCommand::ChangeRegionLights { enabled } => {
                write!(f, "{} {}", NAMES[0], enabled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_names_parse() {
        for name in NAMES {
            assert_eq!(
                RegionLightsCommand::parse(&format!("{name} true")),
                Some(RegionLightsCommand::change(true))
            );
        }
    }

    #[test]
    fn only_literal_true_enables() {
        let off = Some(RegionLightsCommand::change(false));
        assert_eq!(RegionLightsCommand::parse("changeRegionLights false"), off);
        assert_eq!(RegionLightsCommand::parse("changeRegionLights TRUE"), off);
        assert_eq!(RegionLightsCommand::parse("changeRegionLights 1"), off);
        assert_eq!(RegionLightsCommand::parse("changeRegionLights"), off);
    }

    #[test]
    fn other_commands_are_ignored() {
        assert_eq!(RegionLightsCommand::parse(""), None);
        assert_eq!(RegionLightsCommand::parse("changeTint true"), None);
    }

    #[test]
    fn display_round_trips() {
        let cmd = RegionLightsCommand::change(true);
        assert_eq!(cmd.to_string(), "changeRegionLights true");
        assert_eq!(RegionLightsCommand::parse(&cmd.to_string()), Some(cmd));
    }
}
