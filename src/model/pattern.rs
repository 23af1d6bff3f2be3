use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    BullishEngulfing,
    BearishEngulfing,
    Hammer,
    ShootingStar,
    Doji,
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::Hammer => "Hammer",
            PatternKind::ShootingStar => "Shooting Star",
            PatternKind::Doji => "Doji",
        }
    }

    pub fn bias(&self) -> Bias {
        match self {
            PatternKind::BullishEngulfing | PatternKind::Hammer => Bias::Bullish,
            PatternKind::BearishEngulfing | PatternKind::ShootingStar => Bias::Bearish,
            PatternKind::Doji => Bias::Neutral,
        }
    }
}

/// A named candlestick formation and the direction it leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub bias: Bias,
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl From<PatternKind> for Pattern {
    fn from(kind: PatternKind) -> Self {
        Self {
            kind,
            bias: kind.bias(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bias = match self.bias {
            Bias::Bullish => "bullish",
            Bias::Bearish => "bearish",
            Bias::Neutral => "neutral",
        };
        write!(f, "{} ({})", self.name(), bias)
    }
}
