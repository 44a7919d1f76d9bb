//! Token binding against a schema.
//!
//! The binder resolves each token's key, enforces the cardinality rule of
//! the matched option, and drives the typed assignment into the
//! destination object. Nothing here mutates the schema, so one schema can
//! serve concurrent bind calls for different command lines.

use std::collections::HashSet;

use crate::error::{BindError, ParseError};
use crate::schema::{OptKind, Schema};
use crate::tokenize::{RawToken, tokenize};

/// How the binder treats tags with no matching option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Unknown tags abort the bind.
    #[default]
    Strict,
    /// Unknown tags are dropped silently.
    Lenient,
}

impl<C> Schema<C> {
    /// Binds tokens into `dest`, enforcing cardinality and required
    /// options.
    ///
    /// Assignments happen in token order; a failure part-way through
    /// leaves earlier fields written. Callers that need all-or-nothing
    /// semantics should bind into a scratch value and move it on success.
    pub fn bind(
        &self,
        tokens: &[RawToken],
        dest: &mut C,
        strictness: Strictness,
    ) -> Result<(), BindError> {
        let mut matched: HashSet<char> = HashSet::new();

        for token in tokens {
            let Some(spec) = self.find(&token.key) else {
                match strictness {
                    Strictness::Strict => {
                        return Err(BindError::UnknownTag {
                            key: token.key.clone(),
                            position: token.position,
                        });
                    }
                    Strictness::Lenient => {
                        tracing::debug!(key = %token.key, "dropping unknown tag");
                        continue;
                    }
                }
            };

            // Catches `-i ... --input ...`, which the tokenizer's literal
            // duplicate check cannot see.
            if !matched.insert(spec.short) {
                return Err(BindError::RepeatedOption {
                    key: token.key.clone(),
                    position: token.position,
                });
            }

            match spec.kind {
                OptKind::Flag if !token.values.is_empty() => {
                    return Err(BindError::FlagWithValue {
                        key: token.key.clone(),
                        position: token.position,
                    });
                }
                OptKind::Single if token.values.is_empty() => {
                    return Err(BindError::MissingValue {
                        key: token.key.clone(),
                        position: token.position,
                    });
                }
                OptKind::Single if token.values.len() > 1 => {
                    return Err(BindError::TooManyValues {
                        key: token.key.clone(),
                        count: token.values.len(),
                        position: token.position,
                    });
                }
                _ => {}
            }

            spec.apply(dest, &token.values)
                .map_err(|source| BindError::Convert {
                    key: token.key.clone(),
                    position: token.position,
                    source,
                })?;
        }

        for spec in self.specs() {
            if spec.required && !matched.contains(&spec.short) {
                return Err(BindError::MissingRequired {
                    key: spec.display_key(),
                });
            }
        }

        Ok(())
    }

    /// Tokenizes `line` and binds the result into `dest` in one call.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashwalk_args::{Schema, Strictness};
    ///
    /// #[derive(Default)]
    /// struct Opts {
    ///     verbose: bool,
    ///     inputs: Vec<String>,
    /// }
    ///
    /// let schema = Schema::builder("demo", "demo [-v] -i=FOLDER,...", "A demo tool.")
    ///     .flag('v', Some("verbose"), "Chatty output.", |o: &mut Opts| o.verbose = true)
    ///     .array('i', Some("input"), "Input folders.", |o: &mut Opts, v| o.inputs = v)
    ///     .required()
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut opts = Opts::default();
    /// schema
    ///     .parse_line("demo -v -i=a,b", &mut opts, Strictness::Strict)
    ///     .unwrap();
    /// assert!(opts.verbose);
    /// assert_eq!(opts.inputs, ["a", "b"]);
    /// ```
    pub fn parse_line(
        &self,
        line: &str,
        dest: &mut C,
        strictness: Strictness,
    ) -> Result<(), ParseError> {
        let tokens = tokenize(line)?;
        self.bind(&tokens, dest, strictness)?;
        Ok(())
    }
}
