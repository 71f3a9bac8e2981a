// Standard Library Imports
use std::{ops::Deref, str::FromStr};

// External Crate Imports
use ahash::{HashMap, HashMapExt};
use knuffel::{
    Decode, DecodeScalar,
    ast::{self, Integer, Literal, Radix, TypeName},
    decode::{Context, Kind},
    errors::{DecodeError, ExpectedType},
    span::Spanned,
    traits::ErrorSpan,
};
use miette::{Diagnostic, Result};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

// Local Crate Imports
use crate::Residue;

// Public API ==========================================================================================================

pub const DEFAULT_KDL: &str = include_str!("../data/residue_database.kdl");

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ResidueDatabase {
    water: Decimal,
    residues: HashMap<char, Residue>,
}

impl ResidueDatabase {
    pub fn from_kdl(file_name: impl AsRef<str>, text: impl AsRef<str>) -> Result<Self> {
        let parsed_db: ResidueDatabaseKdl = knuffel::parse(file_name.as_ref(), text.as_ref())?;

        let mut residues = HashMap::with_capacity(parsed_db.residues.len());
        for ResidueKdl { code, name, mass } in parsed_db.residues {
            let residue = Residue { name, mass: mass.0 };
            if residues.insert(code.0, residue).is_some() {
                return Err(DuplicateResidueError(code.0).into());
            }
        }

        Ok(Self {
            water: parsed_db.water.0,
            residues,
        })
    }

    #[must_use]
    pub const fn water(&self) -> Decimal {
        self.water
    }

    #[must_use]
    pub fn residue_mass(&self, code: char) -> Option<Decimal> {
        self.residues.get(&code).map(|r| r.mass)
    }

    #[must_use]
    pub fn residue_name(&self, code: char) -> Option<&str> {
        self.residues.get(&code).map(|r| r.name.as_str())
    }

    /// The monoisotopic mass of a whole sequence (the sum of its residues plus one water), or `None` if the sequence
    /// contains a residue missing from this database
    #[must_use]
    pub fn monoisotopic_mass(&self, residues: &str) -> Option<f64> {
        residues
            .chars()
            .map(|code| self.residue_mass(code))
            .sum::<Option<Decimal>>()
            .and_then(|mass| (mass + self.water).to_f64())
    }
}

impl Default for ResidueDatabase {
    fn default() -> Self {
        // SAFETY: The embedded database is checked by the tests below, so parsing it can't fail
        Self::from_kdl("residue_database.kdl", DEFAULT_KDL).unwrap()
    }
}

// KDL File Schema =====================================================================================================

#[derive(Debug, Decode)]
struct ResidueDatabaseKdl {
    #[knuffel(child, unwrap(argument))]
    water: DecimalKdl,
    #[knuffel(child, unwrap(children))]
    residues: Vec<ResidueKdl>,
}

#[derive(Debug, Decode)]
struct ResidueKdl {
    #[knuffel(node_name)]
    code: ResidueCode,
    #[knuffel(argument)]
    name: String,
    #[knuffel(argument)]
    mass: DecimalKdl,
}

// Lossless Parsing of KDL Numbers to Decimal ==========================================================================

#[derive(Debug, Default)]
struct DecimalKdl(Decimal);

impl<S: ErrorSpan> DecodeScalar<S> for DecimalKdl {
    fn type_check(type_name: &Option<Spanned<TypeName, S>>, ctx: &mut Context<S>) {
        if let Some(t) = type_name {
            ctx.emit_error(DecodeError::TypeName {
                span: t.span().clone(),
                found: Some(t.deref().clone()),
                expected: ExpectedType::no_type(),
                rust_type: "Decimal",
            });
        }
    }

    fn raw_decode(
        value: &Spanned<Literal, S>,
        ctx: &mut Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        match &**value {
            Literal::Decimal(ast::Decimal(s)) | Literal::Int(Integer(Radix::Dec, s)) => {
                let res = if s.contains(['e', 'E']) {
                    Decimal::from_scientific(s)
                } else {
                    Decimal::from_str_exact(s)
                };
                match res {
                    Ok(d) => Ok(Self(d)),
                    Err(e) => {
                        ctx.emit_error(DecodeError::conversion(value, Box::new(e)));
                        Ok(Self::default())
                    }
                }
            }
            unsupported => {
                ctx.emit_error(DecodeError::unsupported(
                    value,
                    format!(
                        "expected a decimal number, found {}",
                        Kind::from(unsupported)
                    ),
                ));
                Ok(Self::default())
            }
        }
    }
}

// Residue Code Validation =============================================================================================

#[derive(Debug)]
struct ResidueCode(char);

impl FromStr for ResidueCode {
    type Err = InvalidResidueCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chrs: Vec<_> = s.chars().collect();
        match chrs[..] {
            [c] if c.is_ascii_uppercase() => Ok(Self(c)),
            _ => Err(InvalidResidueCodeError(s.to_owned())),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Diagnostic, Error)]
#[error("expected a single uppercase ASCII letter, got {0:?}")]
struct InvalidResidueCodeError(String);

#[derive(Eq, PartialEq, Debug, Diagnostic, Error)]
#[diagnostic(help("each residue code may only be defined once"))]
#[error("the residue {0:?} was defined more than once")]
struct DuplicateResidueError(char);

// Module Tests ========================================================================================================
