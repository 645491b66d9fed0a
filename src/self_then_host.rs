//! Bundle-first resolution with fallback to a host.
//!
//! The conventional policy asks the host first and only then looks at the
//! plugin's own code. That silently picks the host's version of any unit both
//! sides define. [`SelfThenHostResolver`] inverts it: the bundle scope always
//! wins, and the host is only asked for names the bundle does not have.

use std::collections::HashMap ;
use std::collections::hash_map::Entry ;
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };

use crate::{ BundleScope, HostResolver, LoadError, ResourceLocator, ResourceSequence, SymbolName };
use crate::resolution_chain::{ Delegate, Resolve, ResolutionChain, Tier };



/// Resolves names within a fixed [`BundleScope`], falling back to a host.
///
/// Units defined from the bundle scope are memoized for the lifetime of the
/// resolver, so each name is defined at most once and repeated resolution
/// returns the identical [`Arc`]. Units obtained from the host are returned as
/// the host gave them and never enter the memo.
pub struct SelfThenHostResolver<U> {
	scope: BundleScope<U>,
	host: Arc<dyn HostResolver<U>>,
	defined: Mutex<HashMap<SymbolName, Arc<U>>>,
}

impl<U: Send + Sync + 'static> SelfThenHostResolver<U> {

	/// Creates a resolver owning `scope` and delegating misses to `host`.
	pub fn new( scope: BundleScope<U>, host: Arc<dyn HostResolver<U>> ) -> Self {
		Self { scope, host, defined: Mutex::new( HashMap::new() ) }
	}

	/// The bundle scope searched first.
	#[inline] pub fn scope( &self ) -> &BundleScope<U> { &self.scope }

	/// Resolves `name`: memo, then bundle scope, then host.
	///
	/// # Errors
	/// Whatever the host reports when neither the memo nor the bundle scope has
	/// the symbol, [`LoadError::NotFound`] included. Failures while defining from
	/// the bundle scope are returned without asking the host.
	pub fn resolve( &self, name: &SymbolName ) -> Result<Arc<U>, LoadError> {
		let bundle = BundleTier( self );
		let host = Delegate::new( Tier::Host, &*self.host );
		ResolutionChain::new([ &bundle as &dyn Resolve<U>, &host as &dyn Resolve<U> ])
			.first_success( name )
	}

	/// The unit previously defined from the bundle scope under `name`, if any.
	///
	/// Never defines anything.
	pub fn find_defined( &self, name: &str ) -> Option<Arc<U>> {
		self.memo().get( name ).cloned()
	}

	/// Number of units defined from the bundle scope so far.
	pub fn defined_count( &self ) -> usize { self.memo().len() }

	/// The first bundle-scope locator for resource `name`, else the host's.
	pub fn find_resource( &self, name: &str ) -> Option<ResourceLocator> {
		self.scope.find_resource( name ).or_else(|| self.host.find_resource( name ))
	}

	/// Every bundle-scope locator for resource `name`, followed by every locator
	/// the host has for it.
	///
	/// Bundle locations are probed as the sequence is consumed; the host's
	/// sequence is requested up front. Nothing is deduplicated.
	pub fn find_resources( &self, name: &str ) -> ResourceSequence {
		ResourceSequence::concat([ self.scope.find_resources( name ), self.host.find_resources( name ) ])
	}

	/// The memo only gains an entry once a definition has fully succeeded, so a
	/// panic in [`Bundle::define`]( crate::Bundle::define ) cannot leave it
	/// half-written and a poisoned lock is safe to reuse.
	fn memo( &self ) -> MutexGuard<'_, HashMap<SymbolName, Arc<U>>> {
		self.defined.lock().unwrap_or_else( PoisonError::into_inner )
	}

	/// Memo lookup and bundle-scope definition as one step under the memo lock.
	fn define_from_scope( &self, name: &SymbolName ) -> Result<Option<Arc<U>>, LoadError> {
		let mut defined = self.memo();
		match defined.entry( name.clone() ) {
			Entry::Occupied( entry ) => {
				tracing::trace!( symbol = %name, "already defined" );
				Ok( Some( Arc::clone( entry.get() )))
			},
			Entry::Vacant( entry ) => Ok( self.scope.define_first( name )?
				.map(| unit | Arc::clone( entry.insert( Arc::new( unit ))))),
		}
	}

}

struct BundleTier<'a, U>( &'a SelfThenHostResolver<U> );

impl<U: Send + Sync + 'static> Resolve<U> for BundleTier<'_, U> {
	fn tier( &self ) -> Tier { Tier::Bundle }
	fn try_resolve( &self, name: &SymbolName ) -> Result<Option<Arc<U>>, LoadError> { self.0.define_from_scope( name ) }
}

impl<U> std::fmt::Debug for SelfThenHostResolver<U> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "SelfThenHostResolver" )
			.field( "scope", &self.scope )
			.field( "host", &"<HostResolver>" )
			.finish_non_exhaustive()
	}
}
