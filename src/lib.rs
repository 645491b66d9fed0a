//! Bundle-first symbol resolution for WebAssembly plugins.
//!
//! A plugin ships its own components (its **bundle scope**) but runs inside a
//! host that has already loaded components of its own. When both define a unit
//! under the same name, usually in different versions, asking the host first
//! silently hands the plugin the host's version. Looking only at the bundle
//! breaks every unit the plugin expects to share with the host.
//! `wasm_bundle_loader` resolves each name to exactly one unit and always
//! prefers the plugin's own bundle, asking the host only for what the bundle
//! lacks.
//!
//! # Core Concepts
//!
//! - [`SymbolName`]: The name of a unit to resolve, e.g. `acme.lint.rules`.
//!
//! - [`Bundle`]: A single bundle location able to define units and expose
//! 	resources. [`ComponentDirectory`] is the shipped implementation: a
//! 	directory of `.wasm`/`.wat` components compiled with your [`Engine`].
//!
//! - [`BundleScope`]: The ordered, immutable list of bundle locations a plugin
//! 	brings with it. Order is search priority.
//!
//! - [`HostResolver`]: The resolution chain that was active before the plugin
//! 	was loaded. It is shared, never owned: loaders delegate to it but never
//! 	close it. [`HostRegistry`] is an in-memory host; [`Isolated`] resolves
//! 	nothing.
//!
//! - [`SelfThenHostResolver`]: Resolves from the bundle scope first and falls back
//! 	to the host. Units defined from the bundle are memoized, so every name is
//! 	defined at most once.
//!
//! - [`PluginLoader`]: The entry point. Serializes symbol resolution per loader,
//! 	adds one last fallback to its parent chain and exposes resource lookups.
//!
//! - [`ResourceSequence`]: A lazy, single-pass concatenation of resource
//! 	locators from several scopes.
//!
//! # Resolution Order
//!
//! | Operation | Order | Memoized |
//! |-----------|-------|----------|
//! | [`PluginLoader::load_symbol`] | bundle scope, host, parent | bundle-scope units only |
//! | [`PluginLoader::find_resource`] | bundle scope, host | no |
//! | [`PluginLoader::find_resources`] | bundle scope then host, all matches | no |
//!
//! Only [`LoadError::NotFound`] moves resolution on to the next scope. A corrupt
//! or unreadable component in the bundle is reported as is and never papered
//! over by the host's version.
//!
//! # Re-exports
//!
//! `wasm_bundle_loader` re-exports `Engine` and `Component` from `wasmtime`
//! and `Url` from `url` for convenience.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc ;
//! use wasm_bundle_loader::{ BundleScope, Component, Engine, HostRegistry, PluginLoader };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::default();
//! # let bundle_dir = tempfile::tempdir()?;
//! # std::fs::create_dir_all( bundle_dir.path().join( "acme" ))?;
//! # std::fs::write( bundle_dir.path().join( "acme/Logger.wat" ), "(component)" )?;
//!
//! // The host already has its own `acme.Logger` and a shared `acme.Api`.
//! let host_logger = Arc::new( Component::new( &engine, "(component)" )?);
//! let host_api = Arc::new( Component::new( &engine, "(component)" )?);
//! let host = HostRegistry::<Component>::new()
//! 	.with_unit( "acme.Logger", Arc::clone( &host_logger ))
//! 	.with_unit( "acme.Api", Arc::clone( &host_api ));
//!
//! // The plugin bundles its own `acme.Logger` as `acme/Logger.wat`.
//! let scope = BundleScope::from_directories( &engine, [ bundle_dir.path() ])?;
//! let loader = PluginLoader::new( scope, Arc::new( host ));
//!
//! // The bundle's version wins...
//! let logger = loader.load_symbol( &"acme.Logger".into() )?;
//! assert!( !Arc::ptr_eq( &logger, &host_logger ));
//! // ...and stays the same unit on every later request.
//! assert!( Arc::ptr_eq( &logger, &loader.load_symbol( &"acme.Logger".into() )?));
//!
//! // Names the bundle lacks come from the host, untouched.
//! assert!( Arc::ptr_eq( &loader.load_symbol( &"acme.Api".into() )?, &host_api ));
//! # Ok(())
//! # }
//! ```
//!
//! # Nested Plugins
//!
//! [`PluginLoader`] is itself a [`HostResolver`], so a plugin can host another
//! plugin. The inner plugin sees its own bundle first, then everything its host
//! plugin resolves.
//!
//! ```
//! # use std::sync::Arc ;
//! # use wasm_bundle_loader::{ BundleScope, HostRegistry, PluginLoader };
//! let host = HostRegistry::<&str>::new().with_unit( "core.Api", "core api" );
//! let outer = Arc::new( PluginLoader::<&str>::new( BundleScope::empty(), Arc::new( host )));
//! let inner = PluginLoader::<&str>::new( BundleScope::empty(), outer );
//! assert_eq!( *inner.load_symbol( &"core.Api".into() ).unwrap(), "core api" );
//! ```

mod symbol_name ;
mod load_error ;
mod resource_sequence ;
mod bundle ;
mod host ;
mod resolution_chain ;
mod self_then_host ;
mod plugin_loader ;
mod component_directory ;

#[doc( no_inline )]
pub use wasmtime::Engine ;
#[doc( no_inline )]
pub use wasmtime::component::Component ;
#[doc( no_inline )]
pub use url::Url ;

pub use symbol_name::SymbolName ;
pub use load_error::{ LoadError, SequenceExhausted };
pub use resource_sequence::{ ResourceSequence, ResourceLocator };
pub use bundle::{ Bundle, BundleScope };
pub use host::{ HostResolver, HostRegistry, Isolated };
pub use resolution_chain::{ Resolve, ResolutionChain, Delegate, Tier };
pub use self_then_host::SelfThenHostResolver ;
pub use plugin_loader::PluginLoader ;
pub use component_directory::ComponentDirectory ;
