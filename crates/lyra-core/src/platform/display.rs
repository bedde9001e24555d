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

//! Defines the abstract `DisplaySurface` trait.

/// The drawing surface as the host presents it.
///
/// The surface has two sizes: the *displayed* size the host lays it out at
/// (fractional, in CSS pixels) and the *backing* size of its raster buffer
/// (whole pixels). The backend's job is to keep the latter derived from the
/// former; see [`crate::platform::surface::SurfacePump`].
pub trait DisplaySurface {
    /// The size the host currently displays the surface at, in CSS pixels.
    fn client_size(&self) -> (f64, f64);

    /// The current pixel dimensions of the surface's raster buffer.
    fn backing_size(&self) -> (u32, u32);

    /// Resizes the surface's raster buffer.
    ///
    /// Hosts treat this as idempotent for equal values, so callers may
    /// re-apply the current size freely.
    fn set_backing_size(&self, width: u32, height: u32);

    /// Hides the host's loading placeholder and makes the surface visible.
    fn reveal(&self);
}
