use std::sync::Arc ;
use wasm_bundle_loader::{ BundleScope, HostRegistry, PluginLoader };

use crate::test_bundle::{ TestBundle, TestUnit, locator, scope };
use crate::test_hosts::CountingHost ;

#[test]
fn bundle_locator_wins() {
    let bundle = TestBundle::new( "plugin" ).with_resources( &[ "service.conf" ]);
    let expected = bundle.resource_locator( "service.conf" );
    let loader = PluginLoader::new(
        scope( vec![ bundle ]),
        Arc::new( HostRegistry::<TestUnit>::new().with_resource( "service.conf", locator( "file:///host/service.conf" ))),
    );

    assert_eq!( loader.find_resource( "service.conf" ), Some( expected ));
}

#[test]
fn first_location_in_scope_wins() {
    let first = TestBundle::new( "first" ).with_resources( &[ "a.conf" ]);
    let second = TestBundle::new( "second" ).with_resources( &[ "a.conf", "b.conf" ]);
    let expected_a = first.resource_locator( "a.conf" );
    let expected_b = second.resource_locator( "b.conf" );
    let loader = PluginLoader::new( scope( vec![ first, second ]), Arc::new( HostRegistry::<TestUnit>::new() ));

    assert_eq!( loader.find_resource( "a.conf" ), Some( expected_a ));
    assert_eq!( loader.find_resource( "b.conf" ), Some( expected_b ));
}

#[test]
fn falls_back_to_host_first_match() {
    let host = Arc::new( CountingHost::new( HostRegistry::<TestUnit>::new()
        .with_resource( "host.conf", locator( "file:///host/one/host.conf" ))
        .with_resource( "host.conf", locator( "file:///host/two/host.conf" ))));
    let loader = PluginLoader::new( scope( vec![ TestBundle::new( "plugin" ) ]), host.clone() );

    assert_eq!( loader.find_resource( "host.conf" ), Some( locator( "file:///host/one/host.conf" )));
    assert_eq!( host.resource_calls(), 1 );
}

#[test]
fn absent_everywhere_is_none() {
    let loader = PluginLoader::new( BundleScope::<TestUnit>::empty(), Arc::new( HostRegistry::<TestUnit>::new() ));
    assert_eq!( loader.find_resource( "missing.conf" ), None );
}

#[test]
fn bundle_hit_skips_host() {
    let host = Arc::new( CountingHost::new( HostRegistry::<TestUnit>::new() ));
    let loader = PluginLoader::new(
        scope( vec![ TestBundle::new( "plugin" ).with_resources( &[ "service.conf" ]) ]),
        host.clone(),
    );

    assert!( loader.find_resource( "service.conf" ).is_some() );
    assert_eq!( host.resource_calls(), 0 );
}
