use std::sync::Arc ;
use std::sync::atomic::{ AtomicUsize, Ordering };
use wasm_bundle_loader::{ ResourceSequence, SequenceExhausted };

use crate::test_bundle::locator ;

#[test]
fn exhausted_sequence_does_not_wrap_around() {
    let mut sequence = ResourceSequence::concat([
        ResourceSequence::from_source([ locator( "file:///a/1" ), locator( "file:///a/2" ) ]),
        ResourceSequence::from_source([ locator( "file:///b/1" ) ]),
    ]);

    assert_eq!( sequence.next_locator(), Ok( locator( "file:///a/1" )));
    assert_eq!( sequence.next_locator(), Ok( locator( "file:///a/2" )));
    assert_eq!( sequence.next_locator(), Ok( locator( "file:///b/1" )));
    assert!( !sequence.has_more() );
    assert_eq!( sequence.next_locator(), Err( SequenceExhausted ));
    assert_eq!( sequence.next_locator(), Err( SequenceExhausted ));
    assert!( sequence.next().is_none() );
}

#[test]
fn has_more_skips_empty_sources() {
    let mut sequence = ResourceSequence::concat([
        ResourceSequence::empty(),
        ResourceSequence::from_source( Vec::new() ),
        ResourceSequence::from_source([ locator( "file:///late/1" ) ]),
    ]);

    assert!( sequence.has_more() );
    assert!( sequence.has_more() );
    assert_eq!( sequence.next_locator(), Ok( locator( "file:///late/1" )));
    assert!( !sequence.has_more() );
}

#[test]
fn sources_are_pulled_lazily() {
    let pulled = Arc::new( AtomicUsize::new( 0 ));
    let counter = Arc::clone( &pulled );
    let second = ( 0..3 ).map( move | index | {
        counter.fetch_add( 1, Ordering::SeqCst );
        locator( &format!( "file:///second/{}", index ))
    });
    let mut sequence = ResourceSequence::concat([
        ResourceSequence::from_source([ locator( "file:///first/0" ) ]),
        ResourceSequence::from_source( second ),
    ]);

    assert_eq!( sequence.next_locator(), Ok( locator( "file:///first/0" )));
    assert_eq!( pulled.load( Ordering::SeqCst ), 0 );
    assert!( sequence.has_more() );
    assert_eq!( pulled.load( Ordering::SeqCst ), 1 );
    assert_eq!( sequence.by_ref().count(), 3 );
    assert_eq!( pulled.load( Ordering::SeqCst ), 3 );
}

#[test]
fn buffered_locator_survives_concat() {
    let mut head = ResourceSequence::from_source([ locator( "file:///head/0" ), locator( "file:///head/1" ) ]);
    assert!( head.has_more() );

    let joined = ResourceSequence::concat([ head, ResourceSequence::from_source([ locator( "file:///tail/0" ) ]) ])
        .map(| url | url.path().to_string() )
        .collect::<Vec<_>>();
    assert_eq!( joined, vec![ "/head/0", "/head/1", "/tail/0" ]);
}
