//! Bundle locations and the scope they form.
//!
//! A plugin brings its own code with it as an ordered list of bundle locations
//! (its **bundle scope**). Each location can define units and expose resources.
//! The order of the list is the search priority within the scope.

use std::sync::Arc ;
use itertools::Itertools ;
use url::Url ;

use crate::{ LoadError, ResourceLocator, ResourceSequence, SymbolName };



/// A single bundle location.
///
/// Implementations must be safe to probe from several threads at once:
/// [`find_resource`]( Self::find_resource ) is called without any lock.
/// [`define`]( Self::define ) is only ever called under the owning resolver's
/// memo lock, and at most once successfully per name.
pub trait Bundle<U>: Send + Sync {

	/// Where this bundle lives. Used for diagnostics only.
	fn location( &self ) -> &Url ;

	/// Defines the unit named `name` from this location.
	///
	/// # Errors
	/// `Ok( None )` means the location does not contain the symbol. An `Err`
	/// describes a real failure while reading or building the unit and stops
	/// resolution; it is never treated as a miss.
	fn define( &self, name: &SymbolName ) -> Result<Option<U>, LoadError> ;

	/// The locator of resource `name` in this location, if present.
	fn find_resource( &self, name: &str ) -> Option<ResourceLocator> ;

}

/// The fixed, ordered set of bundle locations owned by one resolver.
///
/// Immutable after construction. Shared through an [`Arc`] so that lazy
/// [`ResourceSequence`]s can keep probing it after the call that created them
/// has returned.
pub struct BundleScope<U> {
	bundles: Arc<[Box<dyn Bundle<U>>]>,
}

impl<U: 'static> BundleScope<U> {

	/// Creates a scope searching `bundles` in the given order.
	pub fn new( bundles: impl IntoIterator<Item = Box<dyn Bundle<U>>> ) -> Self {
		Self { bundles: bundles.into_iter().collect() }
	}

	/// A scope with no locations; every lookup falls through to the host.
	pub fn empty() -> Self { Self::new([]) }

	/// Number of bundle locations.
	#[inline] pub fn len( &self ) -> usize { self.bundles.len() }

	/// Whether the scope has no locations at all.
	#[inline] pub fn is_empty( &self ) -> bool { self.bundles.is_empty() }

	/// The locations in search order.
	pub fn locations( &self ) -> impl Iterator<Item = &Url> { self.bundles.iter().map(| bundle | bundle.location() ) }

	/// Defines `name` from the first location that contains it.
	///
	/// # Errors
	/// Propagates the first failure reported by a location; later locations are
	/// not probed after an error.
	pub fn define_first( &self, name: &SymbolName ) -> Result<Option<U>, LoadError> {
		for bundle in self.bundles.iter() {
			tracing::trace!( symbol = %name, location = %bundle.location(), "probing bundle" );
			if let Some( unit ) = bundle.define( name )? {
				tracing::debug!( symbol = %name, location = %bundle.location(), "defined from bundle" );
				return Ok( Some( unit ));
			}
		}
		Ok( None )
	}

	/// The first location's locator for resource `name`.
	pub fn find_resource( &self, name: &str ) -> Option<ResourceLocator> {
		self.bundles.iter().find_map(| bundle | bundle.find_resource( name ))
	}

	/// Every location's locator for resource `name`, in search order.
	///
	/// Locations are probed lazily as the returned sequence is consumed.
	pub fn find_resources( &self, name: &str ) -> ResourceSequence {
		let bundles = Arc::clone( &self.bundles );
		let name = name.to_owned();
		ResourceSequence::from_source(( 0..bundles.len() )
			.filter_map( move | index | bundles[index].find_resource( &name )))
	}

}

impl<U> std::fmt::Debug for BundleScope<U> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		write!( f, "BundleScope[{}]", self.bundles.iter().map(| bundle | bundle.location() ).join( ", " ))
	}
}
