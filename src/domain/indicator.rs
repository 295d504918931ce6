// Indicator domain model - Normalized record state and its LED colour

/// One of the five visual states a record can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCode {
    Off,
    Red,
    RedGreenBlink,
    GreenOnly,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Off,
    Low,
    High,
}

/// Green/red LED pair for a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedColor {
    pub green: Intensity,
    pub red: Intensity,
}

impl LedColor {
    pub const OFF: LedColor = LedColor::new(Intensity::Off, Intensity::Off);

    pub const fn new(green: Intensity, red: Intensity) -> Self {
        Self { green, red }
    }
}

impl IndicatorCode {
    /// Map a monitor's raw status code ("0".."3") to an indicator.
    /// The codes are opaque here; anything else, including absence, is `Off`.
    pub fn from_status_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("0") => IndicatorCode::Red,
            Some("1") => IndicatorCode::RedGreenBlink,
            Some("2") => IndicatorCode::GreenOnly,
            Some("3") => IndicatorCode::Dim,
            _ => IndicatorCode::Off,
        }
    }

    pub fn color(self) -> LedColor {
        match self {
            IndicatorCode::Red => LedColor::new(Intensity::Off, Intensity::High),
            IndicatorCode::RedGreenBlink => LedColor::new(Intensity::High, Intensity::High),
            IndicatorCode::GreenOnly => LedColor::new(Intensity::High, Intensity::Off),
            IndicatorCode::Dim => LedColor::new(Intensity::Low, Intensity::Low),
            IndicatorCode::Off => LedColor::OFF,
        }
    }

    pub fn is_off(self) -> bool {
        self == IndicatorCode::Off
    }
}
