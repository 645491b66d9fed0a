//! The host side of resolution.
//!
//! A [`HostResolver`] is the resolution chain that was already active before a
//! plugin was loaded. Loaders only ever hold a shared handle to it: they
//! delegate to it but never mutate, close or outlive-manage it.

use std::collections::HashMap ;
use std::sync::Arc ;

use crate::{ LoadError, ResourceLocator, ResourceSequence, SymbolName };



/// A resolution chain owned outside of this crate.
///
/// Implementations are expected to be safe for concurrent use; loaders call
/// into them from any thread, and resource lookups happen without any lock.
pub trait HostResolver<U>: Send + Sync {

	/// Resolves `name` through the host's own policy.
	///
	/// # Errors
	/// [`LoadError::NotFound`] when the host has no such symbol. Other errors are
	/// passed through to the caller untouched.
	fn load_symbol( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> ;

	/// The host's first locator for resource `name`.
	fn find_resource( &self, name: &str ) -> Option<ResourceLocator> ;

	/// All of the host's locators for resource `name`, in the host's order.
	fn find_resources( &self, name: &str ) -> ResourceSequence ;

}

/// A chain that resolves nothing.
///
/// Used as a loader's upward chain when none is configured.
#[derive( Debug, Default, Clone, Copy )]
pub struct Isolated ;

impl<U> HostResolver<U> for Isolated {
	fn load_symbol( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> { Err( LoadError::NotFound( name.clone() )) }
	fn find_resource( &self, _name: &str ) -> Option<ResourceLocator> { None }
	fn find_resources( &self, _name: &str ) -> ResourceSequence { ResourceSequence::empty() }
}

/// An in-memory host environment of already-loaded units and known resources.
///
/// ```
/// use wasm_bundle_loader::{ HostRegistry, HostResolver, ResourceLocator, SymbolName };
///
/// let host = HostRegistry::<&str>::new()
/// 	.with_unit( "acme.shared.Logger", "host logger" )
/// 	.with_resource( "service.conf", ResourceLocator::parse( "file:///etc/service.conf" ).unwrap() );
///
/// let logger = host.load_symbol( &SymbolName::from( "acme.shared.Logger" )).unwrap();
/// assert_eq!( *logger, "host logger" );
/// assert!( host.find_resource( "missing.conf" ).is_none() );
/// ```
pub struct HostRegistry<U> {
	units: HashMap<SymbolName, Arc<U>>,
	resources: HashMap<String, Vec<ResourceLocator>>,
}

impl<U> HostRegistry<U> {

	/// An empty registry.
	pub fn new() -> Self {
		Self { units: HashMap::new(), resources: HashMap::new() }
	}

	/// Registers an already-loaded unit under `name`, replacing any previous one.
	pub fn with_unit( mut self, name: impl Into<SymbolName>, unit: impl Into<Arc<U>> ) -> Self {
		self.units.insert( name.into(), unit.into() );
		self
	}

	/// Adds a locator for resource `name` after any already registered.
	pub fn with_resource( mut self, name: impl Into<String>, locator: ResourceLocator ) -> Self {
		self.resources.entry( name.into() ).or_default().push( locator );
		self
	}

	/// Number of registered units.
	#[inline] pub fn unit_count( &self ) -> usize { self.units.len() }

}

impl<U> Default for HostRegistry<U> {
	fn default() -> Self { Self::new() }
}

impl<U: Send + Sync> HostResolver<U> for HostRegistry<U> {

	fn load_symbol( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> {
		self.units.get( name ).cloned().ok_or_else(|| LoadError::NotFound( name.clone() ))
	}

	fn find_resource( &self, name: &str ) -> Option<ResourceLocator> {
		self.resources.get( name ).and_then(| locators | locators.first() ).cloned()
	}

	fn find_resources( &self, name: &str ) -> ResourceSequence {
		match self.resources.get( name ) {
			Some( locators ) => ResourceSequence::from_source( locators.clone() ),
			None => ResourceSequence::empty(),
		}
	}

}

impl<U: std::fmt::Debug> std::fmt::Debug for HostRegistry<U> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "HostRegistry" )
			.field( "units", &self.units )
			.field( "resources", &self.resources )
			.finish()
	}
}
