// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

// mockall expansions trip these under cfg(test), so they apply to normal builds only.
#![cfg_attr(not(test), deny(warnings))]  // All warnings are treated as errors
#![deny(unsafe_code)]                    // Unsafe code is forbidden
#![deny(missing_docs)]                   // All public items must be documented
#![cfg_attr(not(test), deny(dead_code))] // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # cfn-changeset
//!
//! Create, execute, and delete AWS CloudFormation change sets.
//!
//! ## Overview
//!
//! A change set is a proposed set of modifications to a stack that can be
//! reviewed before it is applied or discarded. This crate covers that
//! lifecycle with three operations:
//!
//! - **create**: read a local template and propose a new change set
//! - **execute**: hand an existing change set to CloudFormation to apply
//! - **delete**: discard an existing change set
//!
//! Each operation validates its input locally and then issues exactly one
//! CloudFormation call. Waiting for the stack update, retries, and rollback
//! are left to CloudFormation and to the caller.
//!
//! ## Modules
//!
//! - [`changeset`]: Change set client, request types, and the API seam
//! - [`config`]: AWS credentials and region
//! - [`error`]: Error types
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```no_run
//! use cfn_changeset::changeset::{ChangeSetClient, ChangeSetRequest};
//! use cfn_changeset::config::AwsSettings;
//!
//! # async fn example() -> cfn_changeset::Result<()> {
//! let settings = AwsSettings::new("AKIA...", "secret", "eu-west-1");
//! let client = ChangeSetClient::from_settings(&settings).await?;
//!
//! let request = ChangeSetRequest::new("demo-stack", "template.yml")
//!     .with_parameters("Env=prod,Owner=team-a");
//! let handle = client.create(&request).await?;
//! println!("created {} ({})", handle.name, handle.id);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod changeset;
pub mod cli;
pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use changeset::{
    create_change_set, delete_change_set, execute_change_set, ChangeSetApi, ChangeSetClient,
    ChangeSetHandle, ChangeSetReference, ChangeSetRequest, CloudFormationApi, NameGenerator,
    ParsedParameter, UuidNameGenerator,
};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{AwsSettings, SettingsLoader};
pub use error::{ChangeSetError, Result};
