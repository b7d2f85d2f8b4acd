//! Tests for the crate.

use simple_test_case::test_case;

use purltools::*;

mod clearlydefined;
mod error;
mod registry;
mod url;

#[test_case(r#""crate/cratesio/-/bitflags/1.0.4""#; "crate_kind")]
#[test_case(r#""npm/npmjs/@vitest/utils/3.0.5""#; "npm_scoped")]
#[test_case(r#""debsrc/debian/-/attr/1:2.4.47-2""#; "debsrc")]
#[test_case(r#""conda/anaconda-main/linux-64/absl-py/0.4.1-py36h06a4308_0""#; "conda")]
#[test]
fn coordinate_roundtrip(serialized: &str) {
    let coordinate = serde_json::from_str::<Coordinate>(serialized).expect("must deserialize");
    let reserialized = serde_json::to_string(&coordinate).expect("must serialize");
    pretty_assertions::assert_eq!(serialized, reserialized);
}

#[test_case(r#""pypi""#, PurlType::Pypi; "pypi")]
#[test_case(r#""cocoapods""#, PurlType::Cocoapods; "cocoapods")]
#[test_case(r#""github""#, PurlType::Github; "github")]
#[test]
fn serializes_purl_type(expected: &str, value: PurlType) {
    pretty_assertions::assert_eq!(expected, serde_json::to_string(&value).unwrap());
}

#[test_case(r#""debsrc""#, CoordinateType::DebSrc; "debsrc")]
#[test_case(r#""pod""#, CoordinateType::Pod; "pod")]
#[test_case(r#""git""#, CoordinateType::Git; "git")]
#[test]
fn serializes_coordinate_type(expected: &str, value: CoordinateType) {
    pretty_assertions::assert_eq!(expected, serde_json::to_string(&value).unwrap());
}
