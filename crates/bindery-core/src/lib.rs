//! Bindery Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Bindery, a
//! scaffolding tool that generates service-binding boilerplate (credential
//! classes, framework configuration, build manifest entries) for Java
//! applications that consume cloud services.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           bindery-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerateService, CatalogService,       │
//! │  VerificationHarness)                   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ServiceStore, Filesystem, Renderer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     bindery-adapters (Infrastructure)   │
//! │ (InMemoryServiceStore, LocalFilesystem, │
//! │  HandlebarsRenderer)                    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ServiceCatalog, ServiceDefinition,     │
//! │  Target, ecosystem profiles)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bindery_core::prelude::*;
//!
//! # fn demo(
//! #     store: Box<dyn ServiceStore>,
//! #     renderer: Box<dyn TemplateRenderer>,
//! #     filesystem: Box<dyn Filesystem>,
//! #     catalog: ServiceCatalog,
//! # ) -> BinderyResult<()> {
//! let target = Target::builder()
//!     .project_name("orders")
//!     .framework(Framework::Liberty)
//!     .build_system(BuildSystem::Maven)
//!     .build()?;
//!
//! let service = GenerateService::new(store, renderer, filesystem);
//! let request = GenerationRequest::new(target, "./out").with_service("dashDb");
//! service.generate(&request, &catalog)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, GenerateService, GenerationReport, GenerationRequest,
        ports::{Filesystem, ServiceStore, TemplateRenderer},
        verification::{VerificationCase, VerificationHarness, VerificationReport},
    };
    pub use crate::domain::{
        BuildSystem, ConfigFragment, Dependency, DependencyScope, EnvEntry, Framework,
        ProjectStructure, RenderContext, ServiceCatalog, ServiceDefinition, ServiceDescriptor,
        ServiceKey, Target, TargetBuilder, TemplateSet,
    };
    pub use crate::error::{BinderyError, BinderyResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
