use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Driving preference profiles understood by the directions provider. The
/// provider answers with a route map keyed by these names.
#[derive(Deserialize, Serialize, JsonSchema, Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RouteOption {
    #[serde(rename = "trafast")]
    Fast,
    #[serde(rename = "tracomfort")]
    Comfort,
    #[default]
    #[serde(rename = "traoptimal")]
    Optimal,
    #[serde(rename = "traavoidtoll")]
    AvoidToll,
    #[serde(rename = "traavoidcaronly")]
    AvoidCarOnly,
}

impl RouteOption {
    /// Served when the requested option is missing from a provider response.
    pub const FALLBACK: RouteOption = RouteOption::Optimal;

    pub const ALL: [RouteOption; 5] = [
        RouteOption::Fast,
        RouteOption::Comfort,
        RouteOption::Optimal,
        RouteOption::AvoidToll,
        RouteOption::AvoidCarOnly,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RouteOption::Fast => "trafast",
            RouteOption::Comfort => "tracomfort",
            RouteOption::Optimal => "traoptimal",
            RouteOption::AvoidToll => "traavoidtoll",
            RouteOption::AvoidCarOnly => "traavoidcaronly",
        }
    }
}

impl Display for RouteOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RouteOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteOption::ALL
            .into_iter()
            .find(|option| option.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown route option: {s}"))
    }
}
