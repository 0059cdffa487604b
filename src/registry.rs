//! Engine-facing function registration.
//!
//! The query engine hands the core a [`FunctionFactory`] at startup;
//! [`register_string_similarity`] fills it with the four n-gram distance
//! functions under their engine names. Each entry carries a scalar and a
//! columnar execution path, both monomorphized from the same generic core.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::batch::{constant_constant, vector_constant};
use crate::column::StringColumn;
use crate::error::{GramError, Result};
use crate::gram::{Ascii, Utf8};

/// A registered similarity function: one scalar and one columnar entry
/// point sharing a name.
#[derive(Clone, Copy)]
pub struct SimilarityFunction {
    name: &'static str,
    scalar: fn(&[u8], &[u8]) -> f32,
    columnar: fn(&StringColumn, &[u8]) -> Vec<f32>,
}

impl SimilarityFunction {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Distance between a constant needle and one haystack.
    pub fn eval_scalar(&self, needle: &[u8], haystack: &[u8]) -> f32 {
        (self.scalar)(needle, haystack)
    }

    /// Distance between a constant needle and every row of a column.
    pub fn eval_column(&self, column: &StringColumn, needle: &[u8]) -> Vec<f32> {
        (self.columnar)(column, needle)
    }
}

impl std::fmt::Debug for SimilarityFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityFunction")
            .field("name", &self.name)
            .finish()
    }
}

/// Name-keyed function registry, filled once at engine startup.
#[derive(Debug, Default)]
pub struct FunctionFactory {
    functions: HashMap<&'static str, SimilarityFunction>,
}

impl FunctionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one function. Names are unique; a second registration of
    /// the same name is refused.
    pub fn register(&mut self, function: SimilarityFunction) -> Result<()> {
        match self.functions.entry(function.name) {
            Entry::Occupied(_) => Err(GramError::DuplicateFunction {
                name: function.name,
            }),
            Entry::Vacant(slot) => {
                slot.insert(function);
                Ok(())
            }
        }
    }

    /// Look up a function by its engine name.
    pub fn get(&self, name: &str) -> Result<&SimilarityFunction> {
        self.functions
            .get(name)
            .ok_or_else(|| GramError::UnknownFunction {
                name: name.to_owned(),
            })
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Startup hook: registers the four n-gram distance functions.
pub fn register_string_similarity(factory: &mut FunctionFactory) -> Result<()> {
    factory.register(SimilarityFunction {
        name: "ngramDistance",
        scalar: constant_constant::<Ascii<false>>,
        columnar: vector_constant::<Ascii<false>>,
    })?;
    factory.register(SimilarityFunction {
        name: "ngramDistanceCaseInsensitive",
        scalar: constant_constant::<Ascii<true>>,
        columnar: vector_constant::<Ascii<true>>,
    })?;
    factory.register(SimilarityFunction {
        name: "ngramDistanceUTF8",
        scalar: constant_constant::<Utf8<false>>,
        columnar: vector_constant::<Utf8<false>>,
    })?;
    factory.register(SimilarityFunction {
        name: "ngramDistanceCaseInsensitiveUTF8",
        scalar: constant_constant::<Utf8<true>>,
        columnar: vector_constant::<Utf8<true>>,
    })?;
    Ok(())
}
