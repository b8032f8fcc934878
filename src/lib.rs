// Copyright 2025 Cowboy AI, LLC.

//! # CIM Frontend
//!
//! Controller composition for the shop domain tier of the Composable
//! Information Machine.
//!
//! Given a controller path such as `product` or `basket/address`, the
//! [`Frontend`] resolves the configured implementation, wraps it with the
//! configured decorator chain and hands back a [`ControllerHandle`] whose
//! behaviour can be extended without touching the base controller:
//! - **Registry**: start-up populated factories for controllers and decorators
//! - **Decorator chain**: `default` (minus `excludes`), `global` and `local` tiers
//! - **Prototype cache**: decorated stacks shared between requests
//! - **Expression accumulator**: per-request conditions and sort clauses
//! - **Sort keys**: the comma-separated, function-call aware sort grammar
//!
//! ```no_run
//! use cim_frontend::{Config, Context, Frontend, Registry};
//!
//! # fn main() -> cim_frontend::FrontendResult<()> {
//! let registry = Registry::builder()
//!     .with_builtin_decorators()?
//!     .add_standard("product")?
//!     .build();
//! let frontend = Frontend::new(registry);
//! let ctx = Context::new(Config::new());
//!
//! let mut products = frontend.create(&ctx, "product", None)?;
//! products
//!     .compare("==", "product.status", 1)?
//!     .sort(Some("-position,code"))?
//!     .slice(0, 48)?;
//! let found = products.search()?;
//! # let _ = found;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod accumulator;
mod cache;
mod config;
mod context;
mod errors;
mod frontend;
mod manager;
mod registry;
pub mod controller;
pub mod criteria;
pub mod decorator;
pub mod sort_keys;

pub use accumulator::{ExpressionAccumulator, Slice, DEFAULT_SLICE_SIZE};
pub use cache::PrototypeCache;
pub use config::{implementation_name, Config, DecoratorSettings, PREFIX};
pub use context::Context;
pub use controller::{layers, Controller, ControllerHandle, Method, OuterRef, StandardController};
pub use criteria::{Condition, Expression, Filter, Operator, Sort, SortDirection};
pub use decorator::{wrap, DecoratorBase};
pub use errors::{FrontendError, FrontendResult};
pub use frontend::Frontend;
pub use manager::{Manager, SearchResult};
pub use registry::{
    validate_name, validate_path, ClassId, ControllerFactory, DecoratorFactory,
    DecoratorRegistration, Namespace, Registry, RegistryBuilder,
};
pub use sort_keys::{split_keys, SortKey};
