//! Parsing of the raw argument tokens forwarded to a generator.

use std::collections::BTreeSet;

use crate::domain::{
    capabilities::{GeneratorDef, OutputName},
    error::DomainError,
    value_objects::GeneratorFlag,
};

/// Validated arguments for one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorArgs {
    name: Option<String>,
    flags: BTreeSet<GeneratorFlag>,
}

impl GeneratorArgs {
    /// Parse `args` for the generator described by `def`.
    ///
    /// Tokens starting with `--` are flags; the first other token is the name.
    /// A trailing extension matching the generator's output extension is
    /// stripped, case-insensitively (`MyClass.CS` names `MyClass`).
    ///
    /// # Errors
    ///
    /// - `InvalidArguments` for a flag the generator does not accept, or an
    ///   unexpected positional token
    /// - `MissingName` when the generator needs a name and none was given
    /// - `InvalidIdentifier` when the name is not a valid identifier
    pub fn parse<S: AsRef<str>>(def: &GeneratorDef, args: &[S]) -> Result<Self, DomainError> {
        let mut name = None;
        let mut flags = BTreeSet::new();

        for token in args.iter().map(AsRef::as_ref) {
            if token.starts_with("--") {
                let flag: GeneratorFlag = token.parse()?;
                if !def.accepts(flag) {
                    return Err(DomainError::InvalidArguments(format!(
                        "'{}' does not accept {flag}",
                        def.kind
                    )));
                }
                flags.insert(flag);
            } else if def.requires_name && name.is_none() {
                name = Some(token.to_string());
            } else {
                return Err(DomainError::InvalidArguments(format!(
                    "unexpected argument '{token}' for '{}'",
                    def.kind
                )));
            }
        }

        let name = match (def.requires_name, name) {
            (true, None) => {
                return Err(DomainError::MissingName {
                    generator: def.kind.to_string(),
                });
            }
            (true, Some(raw)) => {
                let stem = strip_extension(&raw, def.name_extension());
                validate_identifier(stem)?;
                Some(stem.to_string())
            }
            (false, _) => None,
        };

        Ok(Self { name, flags })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_flag(&self, flag: GeneratorFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = GeneratorFlag> + '_ {
        self.flags.iter().copied()
    }

    /// File name this invocation writes, relative to the working directory.
    pub fn output_file(&self, def: &GeneratorDef) -> String {
        match def.output {
            OutputName::Fixed(file) => file.to_string(),
            OutputName::FromArgument { extension } => {
                format!("{}.{extension}", self.name.as_deref().unwrap_or_default())
            }
            OutputName::Switched {
                stem,
                default_extension,
                flag,
                flag_extension,
            } => {
                let ext = if self.has_flag(flag) {
                    flag_extension
                } else {
                    default_extension
                };
                format!("{stem}.{ext}")
            }
        }
    }
}

fn strip_extension<'a>(raw: &'a str, extension: Option<&str>) -> &'a str {
    let Some(ext) = extension else { return raw };
    match raw.rsplit_once('.') {
        Some((stem, found)) if found.eq_ignore_ascii_case(ext) => stem,
        _ => raw,
    }
}

/// A C# identifier: letter or `_` first, then letters, digits or `_`.
fn validate_identifier(value: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidIdentifier {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = value.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(invalid("must start with a letter or '_'"));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::generator_def;
    use crate::domain::value_objects::GeneratorKind;

    fn parse(kind: GeneratorKind, args: &[&str]) -> Result<GeneratorArgs, DomainError> {
        GeneratorArgs::parse(generator_def(kind), args)
    }

    #[test]
    fn name_with_or_without_extension() {
        let def = generator_def(GeneratorKind::Class);
        for raw in ["MyClass", "MyClass.cs", "MyClass.CS"] {
            let args = parse(GeneratorKind::Class, &[raw]).unwrap();
            assert_eq!(args.name(), Some("MyClass"));
            assert_eq!(args.output_file(def), "MyClass.cs");
        }
    }

    #[test]
    fn foreign_extension_is_not_stripped() {
        assert!(matches!(
            parse(GeneratorKind::Json, &["file.jsx"]),
            Err(DomainError::InvalidIdentifier { .. })
        ));
        let args = parse(GeneratorKind::Jsx, &["file.jsx"]).unwrap();
        assert_eq!(args.output_file(generator_def(GeneratorKind::Jsx)), "file.jsx");
    }

    #[test]
    fn readme_switches_on_txt() {
        let def = generator_def(GeneratorKind::Readme);
        assert_eq!(parse(GeneratorKind::Readme, &[]).unwrap().output_file(def), "README.md");
        assert_eq!(
            parse(GeneratorKind::Readme, &["--txt"]).unwrap().output_file(def),
            "README.txt"
        );
    }

    #[test]
    fn dockerfile_accepts_sqlite_only() {
        assert!(parse(GeneratorKind::Dockerfile, &["--sqlite"])
            .unwrap()
            .has_flag(GeneratorFlag::Sqlite));
        assert!(matches!(
            parse(GeneratorKind::Dockerfile, &["--txt"]),
            Err(DomainError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse(GeneratorKind::Program, &["--sqlite"]),
            Err(DomainError::InvalidArguments(_))
        ));
    }

    #[test]
    fn missing_and_extra_names() {
        assert!(matches!(
            parse(GeneratorKind::Middleware, &[]),
            Err(DomainError::MissingName { .. })
        ));
        assert!(matches!(
            parse(GeneratorKind::Class, &["A", "B"]),
            Err(DomainError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse(GeneratorKind::Startup, &["Extra"]),
            Err(DomainError::InvalidArguments(_))
        ));
    }

    #[test]
    fn rejects_bad_identifiers() {
        for bad in ["1Class", "My-Class", "../evil", ".cs", "Models.Cart", "-x"] {
            assert!(
                matches!(
                    parse(GeneratorKind::Class, &[bad]),
                    Err(DomainError::InvalidIdentifier { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }
}
