// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two independently composed API exposures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSurface {
    Shop,
    Admin,
}

impl ApiSurface {
    pub const ALL: [ApiSurface; 2] = [ApiSurface::Shop, ApiSurface::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiSurface::Shop => "shop",
            ApiSurface::Admin => "admin",
        }
    }

    /// The shop surface only exposes fields meant for the public.
    pub fn is_public(&self) -> bool {
        matches!(self, ApiSurface::Shop)
    }
}

impl Display for ApiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown API surface '{0}'. Expected 'shop' or 'admin'")]
pub struct UnknownSurfaceError(String);

impl FromStr for ApiSurface {
    type Err = UnknownSurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shop" => Ok(ApiSurface::Shop),
            "admin" => Ok(ApiSurface::Admin),
            _ => Err(UnknownSurfaceError(s.to_string())),
        }
    }
}
