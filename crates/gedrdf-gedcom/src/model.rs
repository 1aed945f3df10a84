//! Typed record model: individuals and families linked by xref pointers.
//!
//! Every optional field is an `Option`: `None` means the tag was absent,
//! `Some` with empty content means the tag was present but empty.

use std::fmt;

/// Record identifier, stored without the surrounding `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Xref(String);

impl Xref {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self(id.trim_matches('@').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a pointer value such as `@I1@`.
    pub fn from_pointer(value: &str) -> Option<Self> {
        let inner = value.trim().strip_prefix('@')?.strip_suffix('@')?;
        (!inner.is_empty()).then(|| Self(inner.to_string()))
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// `M`/`F` (case-insensitive); anything else is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            c if c.eq_ignore_ascii_case("m") => Sex::Male,
            c if c.eq_ignore_ascii_case("f") => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub given: Option<String>,
    pub family: Option<String>,
}

impl Name {
    /// Split a `NAME` value of the form `Given /Family/`.
    pub fn parse(value: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }

        match value.split_once('/') {
            Some((given, rest)) => {
                let family = rest.split_once('/').map_or(rest, |(family, _)| family);
                Self {
                    given: non_empty(given),
                    family: non_empty(family),
                }
            }
            None => Self {
                given: non_empty(value),
                family: None,
            },
        }
    }

    /// The `NAME` line value.
    pub fn to_value(&self) -> String {
        match (&self.given, &self.family) {
            (Some(given), Some(family)) => format!("{given} /{family}/"),
            (Some(given), None) => given.clone(),
            (None, Some(family)) => format!("/{family}/"),
            (None, None) => String::new(),
        }
    }
}

/// Date and place of a birth, death, or marriage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDetail {
    pub date: Option<String>,
    pub place: Option<String>,
}

/// Free text split into a primary line and ordered continuation lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub first: String,
    pub continuations: Vec<String>,
}

impl Note {
    /// Split on `\n` only; any `\r` stays in the line it ends.
    pub fn from_text(text: &str) -> Self {
        let mut lines = text.split('\n');
        let first = lines.next().unwrap_or_default().to_string();
        Self {
            first,
            continuations: lines.map(str::to_string).collect(),
        }
    }

    /// Join with `\n`.
    pub fn text(&self) -> String {
        let mut out = self.first.clone();
        for line in &self.continuations {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub xref: Xref,
    pub name: Option<Name>,
    /// Raw `SEX` code as written in the file.
    pub sex: Option<String>,
    pub birth: Option<EventDetail>,
    pub death: Option<EventDetail>,
    pub note: Option<Note>,
    pub title: Option<String>,
    /// Families this individual belongs to as a child (`FAMC`).
    pub famc: Vec<Xref>,
    /// Families this individual belongs to as a spouse (`FAMS`).
    pub fams: Vec<Xref>,
}

impl Individual {
    pub fn new(xref: Xref) -> Self {
        Self {
            xref,
            name: None,
            sex: None,
            birth: None,
            death: None,
            note: None,
            title: None,
            famc: Vec::new(),
            fams: Vec::new(),
        }
    }

    /// `(given, family)` name parts.
    pub fn name_parts(&self) -> (Option<&str>, Option<&str>) {
        match &self.name {
            Some(name) => (name.given.as_deref(), name.family.as_deref()),
            None => (None, None),
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex.as_deref().map_or(Sex::Unknown, Sex::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub xref: Xref,
    pub husband: Option<Xref>,
    pub wife: Option<Xref>,
    pub marriage: Option<EventDetail>,
    pub children: Vec<Xref>,
}

impl Family {
    pub fn new(xref: Xref) -> Self {
        Self {
            xref,
            husband: None,
            wife: None,
            marriage: None,
            children: Vec::new(),
        }
    }

    pub fn has_marriage(&self) -> bool {
        self.marriage.is_some()
    }

    /// Husband then wife, skipping absent roles.
    pub fn partners(&self) -> impl Iterator<Item = &Xref> {
        self.husband.iter().chain(self.wife.iter())
    }
}

/// A parsed GEDCOM file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GedcomFile {
    pub individuals: Vec<Individual>,
    pub families: Vec<Family>,
}

impl GedcomFile {
    pub fn individual(&self, xref: &Xref) -> Option<&Individual> {
        self.individuals.iter().find(|i| &i.xref == xref)
    }

    pub fn family(&self, xref: &Xref) -> Option<&Family> {
        self.families.iter().find(|f| &f.xref == xref)
    }

    /// The family an individual was born into: its first `FAMC` pointer, or
    /// else the first family listing it under `CHIL`.
    pub fn family_of_origin(&self, individual: &Individual) -> Option<&Family> {
        match individual.famc.first() {
            Some(famc) => self.family(famc),
            None => self
                .families
                .iter()
                .find(|f| f.children.contains(&individual.xref)),
        }
    }

    /// `(father, mother)` pointers, resolved through the family of origin.
    pub fn parents_of(&self, individual: &Individual) -> (Option<&Xref>, Option<&Xref>) {
        match self.family_of_origin(individual) {
            Some(family) => (family.husband.as_ref(), family.wife.as_ref()),
            None => (None, None),
        }
    }
}
