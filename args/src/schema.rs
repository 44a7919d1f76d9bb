//! Schema model and builder.
//!
//! A [`Schema`] describes every option a command accepts: its keys, its
//! cardinality, its coercion target, and its help text. Schemas are built
//! once per destination type through [`Schema::builder`], validated by
//! [`SchemaBuilder::build`], and are immutable afterwards, so one schema
//! can be reused read-only across any number of parse calls.

use std::collections::HashSet;
use std::fmt;

use crate::coerce::ParseValue;
use crate::error::{ConvertError, SchemaError};

/// Cardinality class of an option.
///
/// Derived from the destination field's type: `bool` fields become
/// [`Flag`](OptKind::Flag), `Vec<T>` fields become
/// [`Array`](OptKind::Array), everything else becomes
/// [`Single`](OptKind::Single).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    /// Boolean option taking no values.
    Flag,
    /// Option taking exactly one value.
    Single,
    /// Option taking zero or more comma-delimited values.
    Array,
}

// Send + Sync so a built schema can serve concurrent parse calls.
type Apply<C> = Box<dyn Fn(&mut C, &[String]) -> Result<(), ConvertError> + Send + Sync>;

/// One declared option: keys, cardinality, help text, and the typed
/// assignment into the destination object.
pub struct OptSpec<C> {
    /// Single-letter key, matched by `-x`.
    pub short: char,
    /// Optional word key, matched by `--word`.
    pub long: Option<String>,
    /// Whether the binder rejects a line that omits this option.
    pub required: bool,
    /// Human-readable description rendered into help text.
    pub help: String,
    /// Cardinality class, derived from the declaring builder method.
    pub kind: OptKind,
    /// Coercion target's display name, rendered as `=Name` in help.
    pub value_name: &'static str,
    apply: Apply<C>,
}

impl<C> OptSpec<C> {
    /// Coerces `values` (already cardinality-checked by the binder) and
    /// writes the result into `dest`.
    pub(crate) fn apply(&self, dest: &mut C, values: &[String]) -> Result<(), ConvertError> {
        (self.apply)(dest, values)
    }

    /// Every key form for error messages, e.g. `-i/--input`.
    pub fn display_key(&self) -> String {
        match &self.long {
            Some(long) => format!("-{}/--{long}", self.short),
            None => format!("-{}", self.short),
        }
    }
}

impl<C> fmt::Debug for OptSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptSpec")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("value_name", &self.value_name)
            .finish_non_exhaustive()
    }
}

/// The full set of declared options plus usage and description text for
/// one destination-object shape.
///
/// # Examples
///
/// ```
/// use hashwalk_args::{OptKind, Schema};
///
/// #[derive(Default)]
/// struct Opts {
///     verbose: bool,
/// }
///
/// let schema = Schema::builder("demo", "demo [-v]", "A demo tool.")
///     .flag('v', Some("verbose"), "Chatty output.", |o: &mut Opts| o.verbose = true)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.specs().len(), 1);
/// assert_eq!(schema.specs()[0].kind, OptKind::Flag);
/// assert!(schema.find("verbose").is_some());
/// ```
pub struct Schema<C> {
    name: String,
    usage: String,
    about: String,
    specs: Vec<OptSpec<C>>,
}

impl<C> Schema<C> {
    /// Starts a builder for a schema describing options bound into `C`.
    pub fn builder(name: &str, usage: &str, about: &str) -> SchemaBuilder<C> {
        SchemaBuilder {
            name: name.to_string(),
            usage: usage.to_string(),
            about: about.to_string(),
            specs: Vec::new(),
        }
    }

    /// Program name shown in the help NAME block.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage line shown in the help SYNOPSIS block.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Description shown in the help DESCRIPTION block.
    pub fn about(&self) -> &str {
        &self.about
    }

    /// Declared options in declaration order.
    pub fn specs(&self) -> &[OptSpec<C>] {
        &self.specs
    }

    /// Resolves a token key against the declared options.
    ///
    /// A one-char key matches a short form, anything longer matches a
    /// long form.
    pub fn find(&self, key: &str) -> Option<&OptSpec<C>> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => self.specs.iter().find(|s| s.short == short),
            _ => self.specs.iter().find(|s| s.long.as_deref() == Some(key)),
        }
    }
}

impl<C> fmt::Debug for Schema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("about", &self.about)
            .field("specs", &self.specs)
            .finish()
    }
}

/// Ordered, validating builder for [`Schema`].
///
/// Declaration order is preserved into [`Schema::specs`] and drives help
/// rendering order.
pub struct SchemaBuilder<C> {
    name: String,
    usage: String,
    about: String,
    specs: Vec<OptSpec<C>>,
}

impl<C> SchemaBuilder<C> {
    /// Declares a boolean option taking no values.
    ///
    /// `set` runs once when the tag appears; by convention it sets a
    /// `bool` field to `true`.
    pub fn flag(
        mut self,
        short: char,
        long: Option<&str>,
        help: &str,
        set: impl Fn(&mut C) + Send + Sync + 'static,
    ) -> Self {
        self.specs.push(OptSpec {
            short,
            long: long.map(String::from),
            required: false,
            help: help.to_string(),
            kind: OptKind::Flag,
            value_name: "",
            apply: Box::new(move |dest, _| {
                set(dest);
                Ok(())
            }),
        });
        self
    }

    /// Declares an option taking exactly one value of type `T`.
    pub fn single<T: ParseValue>(
        mut self,
        short: char,
        long: Option<&str>,
        help: &str,
        set: impl Fn(&mut C, T) + Send + Sync + 'static,
    ) -> Self {
        self.specs.push(OptSpec {
            short,
            long: long.map(String::from),
            required: false,
            help: help.to_string(),
            kind: OptKind::Single,
            value_name: T::VALUE_NAME,
            apply: Box::new(move |dest, values| {
                // The binder guarantees exactly one value before calling.
                if let Some(raw) = values.first() {
                    set(dest, T::parse_value(raw)?);
                }
                Ok(())
            }),
        });
        self
    }

    /// Declares an option taking zero or more comma-delimited values,
    /// each coerced to `T`.
    pub fn array<T: ParseValue>(
        mut self,
        short: char,
        long: Option<&str>,
        help: &str,
        set: impl Fn(&mut C, Vec<T>) + Send + Sync + 'static,
    ) -> Self {
        self.specs.push(OptSpec {
            short,
            long: long.map(String::from),
            required: false,
            help: help.to_string(),
            kind: OptKind::Array,
            value_name: T::VALUE_NAME,
            apply: Box::new(move |dest, values| {
                let mut parsed = Vec::with_capacity(values.len());
                for raw in values {
                    parsed.push(T::parse_value(raw)?);
                }
                set(dest, parsed);
                Ok(())
            }),
        });
        self
    }

    /// Marks the most recently declared option as required.
    pub fn required(mut self) -> Self {
        if let Some(last) = self.specs.last_mut() {
            last.required = true;
        }
        self
    }

    /// Validates the declaration and produces the immutable [`Schema`].
    ///
    /// Fails when a short key is not an ASCII letter, a short or long key
    /// collides with an earlier declaration, or any of the name, usage,
    /// or description metadata is blank.
    pub fn build(self) -> Result<Schema<C>, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingMetadata("name"));
        }
        if self.usage.trim().is_empty() {
            return Err(SchemaError::MissingMetadata("usage line"));
        }
        if self.about.trim().is_empty() {
            return Err(SchemaError::MissingMetadata("description"));
        }

        let mut shorts: HashSet<char> = HashSet::new();
        let mut longs: HashSet<&str> = HashSet::new();
        for spec in &self.specs {
            if !spec.short.is_ascii_alphabetic() {
                return Err(SchemaError::InvalidShortKey(spec.short));
            }
            if !shorts.insert(spec.short) {
                return Err(SchemaError::DuplicateShortKey(spec.short));
            }
            if let Some(long) = spec.long.as_deref() {
                if !longs.insert(long) {
                    return Err(SchemaError::DuplicateLongKey(long.to_string()));
                }
            }
        }

        Ok(Schema {
            name: self.name,
            usage: self.usage,
            about: self.about,
            specs: self.specs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Opts {
        verbose: bool,
        count: u32,
        names: Vec<String>,
    }

    fn demo_builder() -> SchemaBuilder<Opts> {
        Schema::builder("demo", "demo [-v] [-c=N] [-n=NAME,...]", "A demo tool.")
            .flag('v', Some("verbose"), "Chatty output.", |o: &mut Opts| o.verbose = true)
            .single('c', Some("count"), "How many.", |o, v: u32| o.count = v)
            .array('n', Some("name"), "Names.", |o, v: Vec<String>| o.names = v)
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let schema = demo_builder().build().unwrap();
        let shorts: Vec<char> = schema.specs().iter().map(|s| s.short).collect();
        assert_eq!(shorts, vec!['v', 'c', 'n']);
    }

    #[test]
    fn test_kind_is_derived_from_builder_method() {
        let schema = demo_builder().build().unwrap();
        assert_eq!(schema.specs()[0].kind, OptKind::Flag);
        assert_eq!(schema.specs()[1].kind, OptKind::Single);
        assert_eq!(schema.specs()[2].kind, OptKind::Array);
    }

    #[test]
    fn test_find_matches_short_and_long_forms() {
        let schema = demo_builder().build().unwrap();
        assert_eq!(schema.find("v").unwrap().short, 'v');
        assert_eq!(schema.find("verbose").unwrap().short, 'v');
        assert!(schema.find("x").is_none());
        assert!(schema.find("nonsense").is_none());
    }

    #[test]
    fn test_required_marks_the_last_spec() {
        let schema = demo_builder().required().build().unwrap();
        assert!(!schema.specs()[0].required);
        assert!(schema.specs()[2].required);
    }

    #[test]
    fn test_rejects_non_letter_short_key() {
        let err = Schema::builder("demo", "demo", "A demo tool.")
            .flag('7', None, "Bad.", |_: &mut Opts| {})
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::InvalidShortKey('7'));
    }

    #[test]
    fn test_rejects_colliding_keys() {
        let err = demo_builder()
            .flag('v', None, "Again.", |_| {})
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateShortKey('v'));

        let err = demo_builder()
            .flag('w', Some("verbose"), "Again.", |_| {})
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateLongKey("verbose".to_string()));
    }

    #[test]
    fn test_rejects_blank_metadata() {
        let err = Schema::builder("demo", "  ", "About.")
            .flag('v', None, "V.", |_: &mut Opts| {})
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingMetadata("usage line"));
    }
}
