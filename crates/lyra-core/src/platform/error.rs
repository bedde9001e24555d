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

//! Defines the error type for platform capability operations.

use std::fmt;

/// An error produced by a host platform capability.
///
/// Callers inside the backend absorb these at the point of occurrence (the
/// host either has the capability or it does not); the variants exist so
/// adapters can report *why* an operation was dropped, which ends up in the
/// debug log rather than in a caller-visible failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The probed host API is not present on this host.
    CapabilityUnavailable {
        /// The name of the absent host API.
        api: &'static str,
    },
    /// The host API exists but rejected the call.
    HostRejected {
        /// The name of the host API that rejected the call.
        api: &'static str,
        /// Host-provided detail, if any.
        details: String,
    },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::CapabilityUnavailable { api } => {
                write!(f, "Host capability '{api}' is not available.")
            }
            PlatformError::HostRejected { api, details } => {
                write!(f, "Host capability '{api}' rejected the call: {details}")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_unavailable_display() {
        let err = PlatformError::CapabilityUnavailable {
            api: "screen.lockOrientation",
        };
        assert_eq!(
            format!("{err}"),
            "Host capability 'screen.lockOrientation' is not available."
        );
    }

    #[test]
    fn test_host_rejected_display() {
        let err = PlatformError::HostRejected {
            api: "screen.orientation.lock",
            details: "NotSupportedError".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Host capability 'screen.orientation.lock' rejected the call: NotSupportedError"
        );
    }
}
