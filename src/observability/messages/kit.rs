// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for kit registration and selection.
//!
//! This module contains message types for logging events related to:
//! * Kits entering the registry
//! * A node selecting, switching or restoring a kit
//! * Converters being rebound to a new host context

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Kit added to the registry.
///
/// # Log Level
/// `debug!` - Startup detail
///
/// # Example
/// ```
/// use the_grafter::observability::messages::kit::KitRegistered;
///
/// let msg = KitRegistered {
///     kit_name: "Objects",
///     description: "Portable objects",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct KitRegistered<'a> {
    pub kit_name: &'a str,
    pub description: &'a str,
}

impl Display for KitRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered kit '{}': {}", self.kit_name, self.description)
    }
}

impl StructuredLog for KitRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            kit_name = self.kit_name,
            description = self.description,
            "{}", self
        );
    }
}

/// A node is now converting with `kit_name`.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_grafter::observability::messages::kit::KitSelected;
///
/// let msg = KitSelected {
///     kit_name: "Display",
///     previous: Some("Objects"),
///     application: "rhino",
/// };
///
/// assert!(msg.to_string().contains("Objects -> Display"));
/// ```
pub struct KitSelected<'a> {
    pub kit_name: &'a str,
    pub previous: Option<&'a str>,
    pub application: &'a str,
}

impl Display for KitSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.previous {
            Some(previous) => write!(
                f,
                "Switched kit {} -> {} for application '{}'",
                previous, self.kit_name, self.application
            ),
            None => write!(
                f,
                "Selected kit {} for application '{}'",
                self.kit_name, self.application
            ),
        }
    }
}

impl StructuredLog for KitSelected<'_> {
    fn log(&self) {
        tracing::info!(
            kit_name = self.kit_name,
            previous = self.previous,
            application = self.application,
            "{}", self
        );
    }
}

/// A persisted kit could not be restored; the default kit is used instead.
///
/// # Log Level
/// `warn!` - The node is not running with the kit it was saved with
///
/// # Example
/// ```
/// use the_grafter::observability::messages::kit::KitFallback;
///
/// let msg = KitFallback {
///     requested: "Revit",
///     fallback: "Objects",
///     reason: "kit not found: Revit",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct KitFallback<'a> {
    pub requested: &'a str,
    pub fallback: &'a str,
    pub reason: &'a str,
}

impl Display for KitFallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Kit '{}' is unavailable ({}); using '{}' instead",
            self.requested, self.reason, self.fallback
        )
    }
}

impl StructuredLog for KitFallback<'_> {
    fn log(&self) {
        tracing::warn!(
            requested = self.requested,
            fallback = self.fallback,
            reason = self.reason,
            "{}", self
        );
    }
}

/// The active converter was reloaded for a new host context.
///
/// # Log Level
/// `debug!` - Internal state change
pub struct ConverterRebound<'a> {
    pub kit_name: &'a str,
    pub application: &'a str,
    pub document: Option<&'a str>,
}

impl Display for ConverterRebound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rebound kit {} to application '{}' (document: {})",
            self.kit_name,
            self.application,
            self.document.unwrap_or("none")
        )
    }
}

impl StructuredLog for ConverterRebound<'_> {
    fn log(&self) {
        tracing::debug!(
            kit_name = self.kit_name,
            application = self.application,
            document = self.document,
            "{}", self
        );
    }
}

/// No registered kit can serve the host application.
///
/// # Log Level
/// `error!` - The node cannot convert anything
pub struct NoKitAvailable<'a> {
    pub application: &'a str,
    pub registered: usize,
}

impl Display for NoKitAvailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No kit available for application '{}' ({} kits registered)",
            self.application, self.registered
        )
    }
}

impl StructuredLog for NoKitAvailable<'_> {
    fn log(&self) {
        tracing::error!(
            application = self.application,
            registered = self.registered,
            "{}", self
        );
    }
}
