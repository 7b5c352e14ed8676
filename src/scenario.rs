use std::fmt;
use std::str::FromStr;

use crate::error::SinteseError;

/// Study scenario a synthesis run is classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioCode {
    ProspectivoInferior,
    ProspectivoSuperior,
    Pmo,
    Outro,
}

impl ScenarioCode {
    /// Fixed ordinal order used by index-based decoding.
    pub const ALL: [ScenarioCode; 4] = [
        ScenarioCode::ProspectivoInferior,
        ScenarioCode::ProspectivoSuperior,
        ScenarioCode::Pmo,
        ScenarioCode::Outro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProspectivoInferior => "PROSPECTIVO_INFERIOR",
            Self::ProspectivoSuperior => "PROSPECTIVO_SUPERIOR",
            Self::Pmo => "PMO",
            Self::Outro => "OUTRO",
        }
    }

    /// Exact, case-sensitive match against the literal value. No trimming.
    pub fn decode_by_name(text: &str) -> Result<Self, SinteseError> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == text)
            .ok_or_else(|| SinteseError::UnrecognizedScenario(text.to_string()))
    }

    pub fn decode_by_index(index: i64) -> Result<Self, SinteseError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| SinteseError::UnrecognizedScenario(index.to_string()))
    }
}

impl fmt::Display for ScenarioCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioCode {
    type Err = SinteseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_by_name(s)
    }
}

/// How the operator's scenario answer is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioMode {
    #[default]
    ByName,
    ByIndex,
}

impl ScenarioMode {
    /// Decode operator text according to this mode.
    ///
    /// In index mode, text that is not an integer is reported the same way
    /// as an out-of-range index.
    pub fn decode(&self, text: &str) -> Result<ScenarioCode, SinteseError> {
        match self {
            Self::ByName => ScenarioCode::decode_by_name(text),
            Self::ByIndex => text
                .parse::<i64>()
                .map_err(|_| SinteseError::UnrecognizedScenario(text.to_string()))
                .and_then(ScenarioCode::decode_by_index),
        }
    }

    pub fn prompt_hint(&self) -> String {
        match self {
            Self::ByName => "PROSPECTIVO_SUPERIOR, PROSPECTIVO_INFERIOR, PMO, OUTRO".to_string(),
            Self::ByIndex => ScenarioCode::ALL
                .iter()
                .enumerate()
                .map(|(i, code)| format!("{i}={code}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl FromStr for ScenarioMode {
    type Err = SinteseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::ByName),
            "index" => Ok(Self::ByIndex),
            other => Err(SinteseError::Config(format!(
                "unknown scenario mode '{other}' (expected 'name' or 'index')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_decoding_inverts_as_str() {
        for code in ScenarioCode::ALL {
            assert_eq!(ScenarioCode::decode_by_name(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn index_decoding_follows_fixed_order() {
        assert_eq!(
            ScenarioCode::decode_by_index(0).unwrap(),
            ScenarioCode::ProspectivoInferior
        );
        assert_eq!(
            ScenarioCode::decode_by_index(1).unwrap(),
            ScenarioCode::ProspectivoSuperior
        );
        assert_eq!(ScenarioCode::decode_by_index(2).unwrap(), ScenarioCode::Pmo);
        assert_eq!(ScenarioCode::decode_by_index(3).unwrap(), ScenarioCode::Outro);
    }

    #[test]
    fn near_misses_are_rejected() {
        for text in ["pmo", " PMO", "PMO ", "PROSPECTIVO", "", "OUTROS"] {
            let err = ScenarioCode::decode_by_name(text).unwrap_err();
            assert!(matches!(err, SinteseError::UnrecognizedScenario(ref t) if t == text));
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        for index in [-1, 4, 100, i64::MIN, i64::MAX] {
            assert!(matches!(
                ScenarioCode::decode_by_index(index),
                Err(SinteseError::UnrecognizedScenario(_))
            ));
        }
    }

    #[test]
    fn index_mode_rejects_non_numeric_text() {
        let mode = ScenarioMode::ByIndex;
        assert_eq!(mode.decode("2").unwrap(), ScenarioCode::Pmo);
        assert!(matches!(
            mode.decode("PMO"),
            Err(SinteseError::UnrecognizedScenario(_))
        ));
    }

    #[test]
    fn mode_parses_from_config_text() {
        assert_eq!("name".parse::<ScenarioMode>().unwrap(), ScenarioMode::ByName);
        assert_eq!("index".parse::<ScenarioMode>().unwrap(), ScenarioMode::ByIndex);
        assert!(matches!(
            "ordinal".parse::<ScenarioMode>(),
            Err(SinteseError::Config(_))
        ));
    }
}
