use std::borrow::Borrow ;
use std::path::PathBuf ;
use std::sync::Arc ;



/// An opaque, immutable identifier naming a unit to resolve.
///
/// Equality is exact string equality. Cloning is cheap, so names can be stored
/// as memo keys and carried inside errors without copying the text.
///
/// No format is imposed here: each [`Bundle`]( crate::Bundle ) decides which
/// names it can map to a location and treats the rest as absent.
#[derive( Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct SymbolName( Arc<str> );

impl SymbolName {

	/// Creates a symbol name from any string-like value.
	pub fn new( name: impl Into<Arc<str>> ) -> Self { Self( name.into() ) }

	/// The name as written.
	#[inline] pub fn as_str( &self ) -> &str { &self.0 }

	/// The `.`-separated segments of the name, in order.
	pub fn segments( &self ) -> impl Iterator<Item = &str> { self.0.split( '.' ) }

	/// Maps `a.b.c` to the relative path `a/b/c.<extension>`.
	///
	/// Returns `None` when a segment could escape the bundle root or address
	/// something other than a plain file: empty segments, `.`/`..`, path
	/// separators and NUL bytes.
	pub fn to_relative_path( &self, extension: &str ) -> Option<PathBuf> {
		let mut path = PathBuf::new();
		for segment in self.segments() {
			if !is_plain_segment( segment ) { return None }
			path.push( segment );
		}
		path.set_extension( extension );
		Some( path )
	}

}

pub(crate) fn is_plain_segment( segment: &str ) -> bool {
	!segment.is_empty()
		&& segment != "."
		&& segment != ".."
		&& !segment.contains([ '/', '\\', '\0' ])
}

impl std::fmt::Display for SymbolName {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { f.write_str( &self.0 ) }
}

impl std::fmt::Debug for SymbolName {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { write!( f, "SymbolName({:?})", &*self.0 ) }
}

impl From<&str> for SymbolName {
	fn from( name: &str ) -> Self { Self::new( name ) }
}

impl From<String> for SymbolName {
	fn from( name: String ) -> Self { Self::new( name ) }
}

impl Borrow<str> for SymbolName {
	fn borrow( &self ) -> &str { &self.0 }
}

impl AsRef<str> for SymbolName {
	fn as_ref( &self ) -> &str { &self.0 }
}
