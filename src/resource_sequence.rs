//! Lazy concatenation of resource lookups from several scopes.
//!
//! A [`ResourceSequence`] presents N ordered sources of [`ResourceLocator`]s as
//! one sequence. Every locator of the first source is yielded before any locator
//! of the second, and each source keeps its own internal order. Sources are only
//! advanced as the sequence is consumed, so a bundle that is never reached is
//! never probed.

use std::collections::VecDeque ;
use std::iter::FusedIterator ;

use crate::load_error::SequenceExhausted ;

/// An opaque handle identifying where a named resource lives.
pub type ResourceLocator = url::Url ;

type Source = Box<dyn Iterator<Item = ResourceLocator> + Send> ;



/// A lazy, finite, single-pass sequence of [`ResourceLocator`]s.
///
/// Once drained the sequence stays drained: [`has_more`]( Self::has_more ) keeps
/// returning `false` and [`next_locator`]( Self::next_locator ) fails with
/// [`SequenceExhausted`]. No deduplication is performed.
///
/// The type is also a plain [`Iterator`], which is the usual way to consume it.
///
/// ```
/// use wasm_bundle_loader::{ ResourceSequence, ResourceLocator };
///
/// let url = | s: &str | ResourceLocator::parse( s ).unwrap();
/// let mut sequence = ResourceSequence::concat([
/// 	ResourceSequence::from_source([ url( "file:///bundle/a.conf" ) ]),
/// 	ResourceSequence::empty(),
/// 	ResourceSequence::from_source([ url( "file:///host/a.conf" ) ]),
/// ]);
///
/// assert_eq!( sequence.next_locator().unwrap().path(), "/bundle/a.conf" );
/// assert!( sequence.has_more() );
/// assert_eq!( sequence.next_locator().unwrap().path(), "/host/a.conf" );
/// assert!( !sequence.has_more() );
/// assert!( sequence.next_locator().is_err() );
/// ```
#[must_use = "resource sequences are lazy and do nothing unless consumed"]
pub struct ResourceSequence {
	sources: VecDeque<Source>,
	/// Locator pulled out by `has_more` but not yet handed to the caller.
	pending: Option<ResourceLocator>,
}

impl ResourceSequence {

	/// A sequence with no locators.
	pub fn empty() -> Self {
		Self { sources: VecDeque::with_capacity( 0 ), pending: None }
	}

	/// A sequence backed by a single source.
	pub fn from_source<I>( source: I ) -> Self
	where
		I: IntoIterator<Item = ResourceLocator>,
		I::IntoIter: Send + 'static,
	{
		Self { sources: VecDeque::from([ Box::new( source.into_iter() ) as Source ]), pending: None }
	}

	/// Joins several sequences, preserving the order in which they are given.
	///
	/// Locators already buffered by a part (through [`has_more`]( Self::has_more ))
	/// keep their place in front of the rest of that part.
	pub fn concat( parts: impl IntoIterator<Item = ResourceSequence> ) -> Self {
		let sources = parts.into_iter()
			.flat_map(| part | {
				let buffered = part.pending.map(| locator | Box::new( std::iter::once( locator )) as Source );
				buffered.into_iter().chain( part.sources )
			})
			.collect();
		Self { sources, pending: None }
	}

	/// Whether another locator is available.
	///
	/// This advances the underlying sources past any that are empty, which is
	/// why it needs `&mut self`.
	pub fn has_more( &mut self ) -> bool {
		if self.pending.is_some() { return true }
		while let Some( source ) = self.sources.front_mut() {
			if let Some( locator ) = source.next() {
				self.pending = Some( locator );
				return true;
			}
			self.sources.pop_front();
		}
		false
	}

	/// Takes the next locator.
	///
	/// # Errors
	/// Returns [`SequenceExhausted`] once every source has been drained. Asking for
	/// more after that is a caller bug; the sequence never wraps around.
	pub fn next_locator( &mut self ) -> Result<ResourceLocator, SequenceExhausted> {
		match self.has_more() {
			true => self.pending.take().ok_or( SequenceExhausted ),
			false => Err( SequenceExhausted ),
		}
	}

}

impl Default for ResourceSequence {
	fn default() -> Self { Self::empty() }
}

impl Iterator for ResourceSequence {
	type Item = ResourceLocator ;
	fn next( &mut self ) -> Option<Self::Item> { self.next_locator().ok() }
}

impl FusedIterator for ResourceSequence {}

impl std::fmt::Debug for ResourceSequence {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ResourceSequence" )
			.field( "remaining_sources", &self.sources.len() )
			.field( "pending", &self.pending )
			.finish()
	}
}
