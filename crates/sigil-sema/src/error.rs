pub mod resolve;

use miette::{Diagnostic, SourceOffset, SourceSpan};

use crate::error::resolve::ResolveError;
use crate::range::Range;

/// A high-level error with diagnostic information for the user, combining a
/// resolution failure with the source span it occurred at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{cause}")]
pub struct Error {
    pub cause: ResolveError,
    pub source_code: String,
    pub location: SourceSpan,
}

impl Error {
    #[cold]
    pub fn from_cause(source_code: impl Into<String>, cause: ResolveError, range: Range) -> Self {
        let source_code = source_code.into();
        let start = SourceOffset::from_location(&source_code, range.start.line as usize, range.start.column);
        let end = SourceOffset::from_location(&source_code, range.end.line as usize, range.end.column);
        let len = end.offset().saturating_sub(start.offset()).max(1);

        Self {
            cause,
            source_code,
            location: SourceSpan::new(start, len),
        }
    }
}

fn type_name<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

impl Diagnostic for Error {
    #[cold]
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(type_name(&self.cause).replace("sigil_sema::error::resolve::", "")) as Box<dyn std::fmt::Display>)
    }

    #[cold]
    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg: Option<String> = match &self.cause {
            ResolveError::UndefinedMethod(name) => {
                Some(format!("No method named '{name}' is visible from the receiver's type. Check spelling or imports."))
            }
            ResolveError::WrongArity { .. } => {
                Some("Check the number of positional and named arguments against the method's parameters.".to_string())
            }
            ResolveError::NoOverloadMatches { candidates, .. } => {
                if candidates.is_empty() {
                    Some("None of the overloads accept these argument types.".to_string())
                } else {
                    Some(format!(
                        "Rejected overloads:\n{}",
                        candidates
                            .iter()
                            .map(|c| format!("  {}: {}", c.def_signature, c.reason))
                            .collect::<Vec<_>>()
                            .join("\n")
                    ))
                }
            }
            ResolveError::Ambiguous { .. } => {
                Some("Add an explicit type restriction to disambiguate, or remove one of the overloads.".to_string())
            }
            ResolveError::NotATuple { .. } => Some("Only a tuple-typed expression can be splatted at a call site.".to_string()),
            ResolveError::SplatUnion { .. } => {
                Some("Narrow the splatted expression to a single tuple shape before splatting it.".to_string())
            }
            ResolveError::NamedArgUnknown(_) => Some("Check the parameter names on the target method.".to_string()),
            ResolveError::NamedArgDuplicate(_) => Some("Remove the duplicate named argument.".to_string()),
            ResolveError::NamedArgCoversSplat(_) => {
                Some("Named arguments cannot target a parameter absorbed by a splat.".to_string())
            }
            ResolveError::MissingArg(_) => Some("Supply a value for every required parameter without a default.".to_string()),
        };
        msg.map(|m| Box::new(m) as Box<dyn std::fmt::Display>)
    }

    #[cold]
    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(format!("{}", self.cause)),
            self.location,
        ))))
    }

    #[cold]
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::Ident;
    use crate::range::Position;

    #[test]
    fn test_from_cause_computes_span() {
        let error = Error::from_cause(
            "foo(1, 2, 3)",
            ResolveError::UndefinedMethod(Ident::new("foo")),
            Range {
                start: Position::new(1, 1),
                end: Position::new(1, 4),
            },
        );
        assert_eq!(error.source_code, "foo(1, 2, 3)");
    }

    #[test]
    fn test_help_and_code_never_panic() {
        let causes = vec![
            ResolveError::UndefinedMethod(Ident::new("foo")),
            ResolveError::Ambiguous {
                name: Ident::new("foo"),
                candidates: vec!["foo(Int32)".to_string(), "foo(*Int32)".to_string()],
            },
            ResolveError::MissingArg(vec![Ident::new("a")]),
        ];
        for cause in causes {
            let error = Error::from_cause("foo()", cause, Range::default());
            let _ = error.code();
            let _ = error.help();
            let _ = error.labels();
        }
    }
}
