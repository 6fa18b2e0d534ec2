// Test serialization using json
#![cfg(feature = "serde")]

use cfnt_tools::fonts::{FamilyName, FontSize, GenericFamily};
use cfnt_tools::generate::GenerateConfig;
use cfnt_tools::raster::Antialias;
use cfnt_tools::{Rgba, Vec2};
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn vec2() {
    test(Vec2(1.0, 2.0), "[1.0,2.0]");
}

#[test]
fn colour() {
    test(Rgba::WHITE, "{\"r\":1.0,\"g\":1.0,\"b\":1.0,\"a\":1.0}");
}

#[test]
fn font() {
    test(FamilyName::Named("abc".to_string()), "{\"Named\":\"abc\"}");
    test(
        FamilyName::Generic(GenericFamily::SansSerif),
        "{\"Generic\":\"SansSerif\"}",
    );
    test(FontSize::Points(20.0), "{\"Points\":20.0}");
}

#[test]
fn antialias() {
    test(Antialias::Subpixel, "\"Subpixel\"");
    test(Antialias::None, "\"None\"");
}

#[test]
fn generate_config() {
    let config = GenerateConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    let back: GenerateConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);

    // missing fields take their defaults
    let partial: GenerateConfig =
        serde_json::from_str("{\"font\":\"Serif 12\",\"count\":3}").unwrap();
    assert_eq!(partial.font, "Serif 12");
    assert_eq!(partial.count, 3);
    assert_eq!(partial.width, 128);
    assert_eq!(partial.antialias, Antialias::Subpixel);
    assert_eq!(partial.output, std::path::PathBuf::from("texture.png"));
}
