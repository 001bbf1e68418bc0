//! Closed sets of SQL-fragment tokens accepted by the sanitizers.
//!
//! Matching is exact and case-sensitive: `"is"` is not `IS`.

use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted in a `WHERE` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `<>`
    NotEqualAnsi,
    /// `=`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `<=>` (null-safe equality)
    NullSafeEq,
    /// `!=`
    NotEq,
    /// `IS`
    Is,
    /// `IS NULL`
    IsNull,
    /// `IS NOT`
    IsNot,
    /// `IS NOT NULL`
    IsNotNull,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl ComparisonOperator {
    /// Every accepted operator.
    pub const ALL: [Self; 14] = [
        Self::Gt,
        Self::Lt,
        Self::NotEqualAnsi,
        Self::Eq,
        Self::Ge,
        Self::Le,
        Self::NullSafeEq,
        Self::NotEq,
        Self::Is,
        Self::IsNull,
        Self::IsNot,
        Self::IsNotNull,
        Self::Like,
        Self::NotLike,
    ];

    /// Get the SQL text of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::NotEqualAnsi => "<>",
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "!=",
            Self::Is => "IS",
            Self::IsNull => "IS NULL",
            Self::IsNot => "IS NOT",
            Self::IsNotNull => "IS NOT NULL",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or(UnknownToken)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connectors joining conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connector {
    /// Every accepted connector.
    pub const ALL: [Self; 2] = [Self::And, Self::Or];

    /// Get the SQL text of the connector.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Connector {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(UnknownToken),
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The token is not part of the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownToken;

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("token is not whitelisted")
    }
}

impl std::error::Error for UnknownToken {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip() {
        for op in ComparisonOperator::ALL {
            assert_eq!(op.as_str().parse::<ComparisonOperator>(), Ok(op));
        }
    }

    #[test]
    fn test_operator_texts_are_distinct() {
        let mut texts: Vec<&str> = ComparisonOperator::ALL.iter().map(|op| op.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 14);
    }

    #[test]
    fn test_operator_is_case_sensitive() {
        assert!("is".parse::<ComparisonOperator>().is_err());
        assert!("like".parse::<ComparisonOperator>().is_err());
        assert!("Is Null".parse::<ComparisonOperator>().is_err());
    }

    #[test]
    fn test_operator_rejects_padding() {
        assert!(" =".parse::<ComparisonOperator>().is_err());
        assert!("IS  NULL".parse::<ComparisonOperator>().is_err());
        assert!("".parse::<ComparisonOperator>().is_err());
    }

    #[test]
    fn test_connector_parsing() {
        assert_eq!("AND".parse::<Connector>(), Ok(Connector::And));
        assert_eq!("OR".parse::<Connector>(), Ok(Connector::Or));
        assert!("and".parse::<Connector>().is_err());
        assert!("XOR".parse::<Connector>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ComparisonOperator::NotLike.to_string(), "NOT LIKE");
        assert_eq!(Connector::Or.to_string(), "OR");
    }
}
