// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The change-state policy: which parts of a pipeline state are re-applied
//! before each draw call.

use std::fmt;

/// Selects which subset of the [`PipelineState`] is re-applied before every
/// draw call of a frame.
///
/// The four variants split the cost of a full state change into two
/// independently measurable parts: the program bind, and everything else
/// (buffers, uniforms, render toggles). The draw submission itself is
/// unconditional under every policy.
///
/// The declaration order is the column order of every report and the order
/// the driver sweeps in.
///
/// [`PipelineState`]: super::PipelineState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeStatePolicy {
    /// Draw with whatever was left bound. The pure draw-call overhead baseline.
    DontChange,
    /// Re-bind the program, skip buffers, uniforms and toggles.
    ChangeOnlyProgram,
    /// Skip the program, re-apply buffers, uniforms and toggles.
    DontChangeProgram,
    /// Re-apply everything. Naive, fully correct state management.
    Change,
}

impl ChangeStatePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [ChangeStatePolicy; 4] = [
        ChangeStatePolicy::DontChange,
        ChangeStatePolicy::ChangeOnlyProgram,
        ChangeStatePolicy::DontChangeProgram,
        ChangeStatePolicy::Change,
    ];

    /// Number of policies.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of the policy in [`ChangeStatePolicy::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ChangeStatePolicy::DontChange => 0,
            ChangeStatePolicy::ChangeOnlyProgram => 1,
            ChangeStatePolicy::DontChangeProgram => 2,
            ChangeStatePolicy::Change => 3,
        }
    }

    /// Whether the program is re-bound before each draw call.
    #[inline]
    pub const fn changes_program(self) -> bool {
        matches!(
            self,
            ChangeStatePolicy::ChangeOnlyProgram | ChangeStatePolicy::Change
        )
    }

    /// Whether buffers, uniforms and render toggles are re-applied before each draw call.
    #[inline]
    pub const fn changes_resources(self) -> bool {
        matches!(
            self,
            ChangeStatePolicy::DontChangeProgram | ChangeStatePolicy::Change
        )
    }

    /// The column header used for this policy in the text report.
    pub const fn report_label(self) -> &'static str {
        match self {
            ChangeStatePolicy::DontChange => "No_state_change",
            ChangeStatePolicy::ChangeOnlyProgram => "Change_only_program",
            ChangeStatePolicy::DontChangeProgram => "No_program_change",
            ChangeStatePolicy::Change => "Change_state",
        }
    }
}

impl fmt::Display for ChangeStatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_declaration_order() {
        for (i, policy) in ChangeStatePolicy::ALL.iter().enumerate() {
            assert_eq!(policy.index(), i);
        }
        let mut sorted = ChangeStatePolicy::ALL;
        sorted.sort();
        assert_eq!(sorted, ChangeStatePolicy::ALL);
    }

    #[test]
    fn policies_split_program_and_resources() {
        use ChangeStatePolicy::*;
        let flags: Vec<(bool, bool)> = ChangeStatePolicy::ALL
            .iter()
            .map(|p| (p.changes_program(), p.changes_resources()))
            .collect();
        assert_eq!(
            flags,
            vec![(false, false), (true, false), (false, true), (true, true)]
        );
        assert!(!DontChange.changes_program() && !DontChange.changes_resources());
    }

    #[test]
    fn report_labels_are_single_tokens() {
        for policy in ChangeStatePolicy::ALL {
            assert!(!policy.report_label().contains(' '));
        }
        assert_eq!(ChangeStatePolicy::Change.to_string(), "Change");
    }
}
