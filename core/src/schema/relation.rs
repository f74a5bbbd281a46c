use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Which side of a link declares the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The declaring object holds the foreign key.
    For,
    /// The target holds the foreign key.
    Has,
}

/// How many targets a relation links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one.
    One,
    /// Any number.
    Many,
}

/// A decoded relation type such as `HasManyPoly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationKind {
    /// For / Has.
    pub direction: Direction,
    /// One / Many.
    pub cardinality: Cardinality,
    /// Whether the concrete target varies at runtime.
    pub polymorphic: bool,
}

impl RelationKind {
    /// Builds a kind from its parts.
    pub const fn new(direction: Direction, cardinality: Cardinality, polymorphic: bool) -> Self {
        Self {
            direction,
            cardinality,
            polymorphic,
        }
    }

    /// `ForOnePoly` / `ForManyPoly`.
    pub fn is_forward_polymorphic(self) -> bool {
        self.polymorphic && self.direction == Direction::For
    }

    /// `HasOnePoly` / `HasManyPoly`.
    pub fn is_reverse_polymorphic(self) -> bool {
        self.polymorphic && self.direction == Direction::Has
    }

    /// Cardinality is `Many`.
    pub fn is_many(self) -> bool {
        self.cardinality == Cardinality::Many
    }
}

impl FromStr for RelationKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, rest) = if let Some(rest) = s.strip_prefix("For") {
            (Direction::For, rest)
        } else if let Some(rest) = s.strip_prefix("Has") {
            (Direction::Has, rest)
        } else {
            return Err(SchemaError::UnknownRelationKind(s.to_string()));
        };

        let (cardinality, rest) = if let Some(rest) = rest.strip_prefix("One") {
            (Cardinality::One, rest)
        } else if let Some(rest) = rest.strip_prefix("Many") {
            (Cardinality::Many, rest)
        } else {
            return Err(SchemaError::UnknownRelationKind(s.to_string()));
        };

        let polymorphic = match rest {
            "" => false,
            "Poly" => true,
            _ => return Err(SchemaError::UnknownRelationKind(s.to_string())),
        };

        Ok(RelationKind::new(direction, cardinality, polymorphic))
    }
}

impl TryFrom<String> for RelationKind {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelationKind> for String {
    fn from(kind: RelationKind) -> Self {
        kind.to_string()
    }
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::For => "For",
            Direction::Has => "Has",
        };
        let cardinality = match self.cardinality {
            Cardinality::One => "One",
            Cardinality::Many => "Many",
        };
        let poly = if self.polymorphic { "Poly" } else { "" };
        write!(f, "{}{}{}", direction, cardinality, poly)
    }
}

/// A named link to another schema object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Decoded relation type.
    #[serde(rename = "type")]
    pub kind: RelationKind,
    /// Target name, when it differs from the relation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliased: Option<String>,
    /// Candidate targets of a forward polymorphic relation.
    #[serde(rename = "for", default, skip_serializing_if = "Vec::is_empty")]
    pub for_targets: Vec<String>,
    /// The matching forward polymorphic relation on the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

impl Relation {
    /// A plain relation of `kind`.
    pub fn new(kind: RelationKind) -> Self {
        Self {
            kind,
            aliased: None,
            for_targets: Vec::new(),
            through: None,
        }
    }

    /// Sets the alias.
    pub fn aliased(mut self, target: impl Into<String>) -> Self {
        self.aliased = Some(target.into());
        self
    }

    /// Sets the polymorphic target set.
    pub fn for_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.for_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the through relation.
    pub fn through(mut self, through: impl Into<String>) -> Self {
        self.through = Some(through.into());
        self
    }

    /// The alias, or `relation_name` when unaliased.
    pub fn target_name<'a>(&'a self, relation_name: &'a str) -> &'a str {
        match self.aliased.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => relation_name,
        }
    }

    /// The object the relation's fields are typed against.
    ///
    /// `HasMany` aliases may carry a dotted path; only its first segment names the target.
    pub fn resolved_target<'a>(&'a self, relation_name: &'a str) -> &'a str {
        let target = self.target_name(relation_name);
        if self.kind.direction == Direction::Has && self.kind.is_many() && !self.kind.polymorphic {
            return target.split('.').next().unwrap_or(target);
        }
        target
    }
}
