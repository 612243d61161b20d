//! Language profiles
//!
//! A [`Profile`] names one of the language variants the shell understands. Each
//! profile maps to a set of [`Capabilities`] that the lexer and parser consult
//! whenever a construct is optional:
//!
//! | profile        | nested | logical | numeric keys | functions | `true`/`false`/`null` |
//! |----------------|--------|---------|--------------|-----------|-----------------------|
//! | `full`         | yes    | yes     | yes          | yes       | yes                   |
//! | `declarations` | no     | no      | no           | no        | yes                   |
//! | `arrays`       | no     | no      | no           | no        | no                    |
//! | `objects`      | yes    | no      | yes          | no        | yes                   |
//! | `functions`    | no     | no      | no           | yes       | no                    |
//! | `while`        | no     | yes     | no           | no        | no                    |

use std::fmt;
use std::str::FromStr;

/// Capability flags selecting which union-grammar constructs are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Array elements and object values may themselves be arrays or objects
    pub nested_literals: bool,
    /// `&&` and `||` are tokens and may combine comparisons
    pub logical_conditions: bool,
    /// Object keys may be numeric literals
    pub numeric_object_keys: bool,
    /// `function` declarations and `return` statements
    pub function_declarations: bool,
    /// `true`, `false` and `null` lex as literals rather than identifiers
    pub keyword_literals: bool,
}

impl Capabilities {
    /// No optional construct enabled.
    pub const fn none() -> Self {
        Capabilities {
            nested_literals: false,
            logical_conditions: false,
            numeric_object_keys: false,
            function_declarations: false,
            keyword_literals: false,
        }
    }

    /// Every optional construct enabled.
    pub const fn all() -> Self {
        Capabilities {
            nested_literals: true,
            logical_conditions: true,
            numeric_object_keys: true,
            function_declarations: true,
            keyword_literals: true,
        }
    }

    pub const fn with_nested_literals(mut self) -> Self {
        self.nested_literals = true;
        self
    }

    pub const fn with_logical_conditions(mut self) -> Self {
        self.logical_conditions = true;
        self
    }

    pub const fn with_numeric_object_keys(mut self) -> Self {
        self.numeric_object_keys = true;
        self
    }

    pub const fn with_function_declarations(mut self) -> Self {
        self.function_declarations = true;
        self
    }

    pub const fn with_keyword_literals(mut self) -> Self {
        self.keyword_literals = true;
        self
    }
}

/// Named language variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Full,
    Declarations,
    Arrays,
    Objects,
    Functions,
    While,
}

impl Profile {
    pub const ALL: [Profile; 6] = [
        Profile::Full,
        Profile::Declarations,
        Profile::Arrays,
        Profile::Objects,
        Profile::Functions,
        Profile::While,
    ];

    pub const fn capabilities(self) -> Capabilities {
        match self {
            Profile::Full => Capabilities::all(),
            Profile::Declarations => Capabilities::none().with_keyword_literals(),
            Profile::Arrays => Capabilities::none(),
            Profile::Objects => Capabilities::none()
                .with_nested_literals()
                .with_numeric_object_keys()
                .with_keyword_literals(),
            Profile::Functions => Capabilities::none().with_function_declarations(),
            Profile::While => Capabilities::none().with_logical_conditions(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Declarations => "declarations",
            Profile::Arrays => "arrays",
            Profile::Objects => "objects",
            Profile::Functions => "functions",
            Profile::While => "while",
        }
    }

    /// The profile after this one, wrapping around (used by the shell's F2 key)
    pub fn next(self) -> Self {
        let index = Profile::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Profile::ALL[(index + 1) % Profile::ALL.len()]
    }
}

impl From<Profile> for Capabilities {
    fn from(profile: Profile) -> Self {
        profile.capabilities()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a profile name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfile(pub String);

impl fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Profile::ALL.iter().map(|p| p.name()).collect();
        write!(
            f,
            "unknown profile '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownProfile {}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Profile::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}
