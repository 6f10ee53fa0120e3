// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — declaration wording and right-to-left visual ordering.

pub mod compose;

pub use compose::{GenderTerms, compose_declaration, reverse_identifier, visual_order};
