pub mod presentation;
pub mod terminal;

/// Which view the binary runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Admin view (`/dm`)
    Dm,
    /// Player view (`/player`)
    Player,
}

impl std::str::FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dm" | "admin" => Ok(Self::Dm),
            "player" => Ok(Self::Player),
            other => Err(format!("Unknown view: {other}")),
        }
    }
}
