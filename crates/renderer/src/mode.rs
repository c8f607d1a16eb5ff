use std::{fmt, str::FromStr};

/// How the mesh is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    Solid,
    #[default]
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Solid => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Solid,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::Solid => "solid",
            RenderMode::Wireframe => "wireframe",
        })
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" | "fill" => Ok(RenderMode::Solid),
            "wireframe" | "wire" | "lines" => Ok(RenderMode::Wireframe),
            other => Err(format!("unknown render mode '{other}' (expected solid|wireframe)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(RenderMode::Solid.toggled(), RenderMode::Wireframe);
        assert_eq!(RenderMode::Solid.toggled().toggled(), RenderMode::Solid);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Solid".parse::<RenderMode>(), Ok(RenderMode::Solid));
        assert_eq!("wire".parse::<RenderMode>(), Ok(RenderMode::Wireframe));
        assert!("points".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::default().to_string(), "wireframe");
    }
}
