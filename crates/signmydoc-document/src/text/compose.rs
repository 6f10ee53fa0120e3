// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Declaration text composer — builds the Hebrew declaration lines and converts
// them into visual (left-to-right) order for the PDF renderer.

use signmydoc_core::{Gender, NotaryDetails};

/// Gender-dependent vocabulary used in the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderTerms {
    pub title: &'static str,
    pub known: &'static str,
    pub warned: &'static str,
    pub pronoun: &'static str,
    pub expected: &'static str,
    pub confirmed: &'static str,
    pub signed: &'static str,
}

const MALE_TERMS: GenderTerms = GenderTerms {
    title: "מר",
    known: "המוכר",
    warned: "שהוזהר",
    pronoun: "עליו",
    expected: "צפוי",
    confirmed: "אישר",
    signed: "חתם",
};

const FEMALE_TERMS: GenderTerms = GenderTerms {
    title: "גב",
    known: "המוכרת",
    warned: "שהוזהרה",
    pronoun: "עליה",
    expected: "צפויה",
    confirmed: "אישרה",
    signed: "חתמה",
};

impl GenderTerms {
    pub fn for_gender(gender: Gender) -> &'static GenderTerms {
        match gender {
            Gender::Male => &MALE_TERMS,
            Gender::Female => &FEMALE_TERMS,
        }
    }
}

/// Build the declaration lines in logical (reading) order, top to bottom.
///
/// `identifier` is embedded verbatim; callers pass it through
/// [`reverse_identifier`] first so that it survives [`visual_order`].
pub fn compose_declaration(
    date: &str,
    name: &str,
    identifier: &str,
    gender: Gender,
    notary: &NotaryDetails,
) -> Vec<String> {
    let terms = GenderTerms::for_gender(gender);
    vec![
        format!(" הריני מאשרת כי ביום {date} הופיע בפני "),
        notary.office_line.clone(),
        format!("{} {name} ת.ז {identifier} {} לי אישית,", terms.title, terms.known),
        format!(
            "ולאחר {} כי {} לאמר את האמת אחרת יהיה",
            terms.warned, terms.pronoun
        ),
        format!("{} לעונשים הקבועים בחוק אם לא יעשה כן,", terms.expected),
        format!(
            "{} את נכונות ההצהרה ) {} עליה בפני (",
            terms.confirmed, terms.signed
        ),
        "*".repeat(38),
        notary.licence_line.clone(),
    ]
}

/// Reverse a string at character level.
pub fn reverse_chars(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reverse the identifier before it is embedded in a line.
pub fn reverse_identifier(identifier: &str) -> String {
    reverse_chars(identifier)
}

/// Convert a logical right-to-left line into visual left-to-right order.
///
/// The whole line is reversed, then every reversed copy of `date` is put back
/// in natural order so the digits read correctly.
pub fn visual_order(line: &str, date: &str) -> String {
    let reversed = reverse_chars(line);
    if date.is_empty() {
        return reversed;
    }
    reversed.replace(&reverse_chars(date), date)
}
