#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Host and path normalization tests
use url_detector::{
    DetectorOptions, Error, NormalizedUrl, UrlBase, detect, normalize_host, normalize_path,
    percent_decode, percent_encode, remove_extra_dots,
};

#[test]
fn test_normalize_detected_url() {
    let urls = detect(
        "link: https://WWW.Example.com:443/x/./y/../z?Q#F",
        DetectorOptions::default(),
    )
    .unwrap();
    assert_eq!(urls.len(), 1);

    let url = urls[0].normalize();
    assert_eq!(url.host(), "www.example.com");
    assert_eq!(url.path(), "/x/z");
    assert_eq!(url.query(), "?Q");
    assert_eq!(url.fragment(), "#F");
    assert_eq!(url.full_url(), "https://www.example.com/x/z?Q#F");
    assert_eq!(url.full_url_without_fragment(), "https://www.example.com/x/z?Q");
}

#[test]
fn test_ip_hosts() {
    let url = NormalizedUrl::create("http://3279880203/").unwrap();
    assert_eq!(url.host(), "195.127.0.11");

    let url = NormalizedUrl::create("http://0xC0A80101/").unwrap();
    assert_eq!(url.host(), "192.168.1.1");
    assert_eq!(
        url.host_bytes(),
        Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 192, 168, 1, 1])
    );

    let url = NormalizedUrl::create("http://[::ffff:192.168.1.1]/").unwrap();
    assert_eq!(url.host(), "192.168.1.1");

    let url =
        NormalizedUrl::create("http://[2001:0db8:0000:0000:0000:0000:0000:0001]/").unwrap();
    assert_eq!(url.host(), "[2001:db8::1]");
    assert_eq!(url.to_string(), "http://[2001:db8::1]/");
}

#[test]
fn test_internationalized_host() {
    let url = NormalizedUrl::create("http://münchen.de/").unwrap();
    assert_eq!(url.original_url(), "http://münchen.de/");
    assert_eq!(url.host(), "xn--mnchen-3ya.de");
}

#[test]
fn test_paths() {
    let url = NormalizedUrl::create("http://example.com//a//b").unwrap();
    assert_eq!(url.path(), "/a/b");

    let url = NormalizedUrl::create("http://example.com/%7Euser/a%20b").unwrap();
    assert_eq!(url.path(), "/~user/a%20b");

    let url = NormalizedUrl::create("http://example.com").unwrap();
    assert_eq!(url.path(), "/");
    assert_eq!(url.full_url(), "http://example.com/");
}

#[test]
fn test_normalize_host_directly() {
    assert_eq!(normalize_host("EXAMPLE.com"), "example.com");
    assert_eq!(normalize_host("..example...com.."), "example.com");
    assert_eq!(normalize_host("3279880203"), "195.127.0.11");
    assert_eq!(normalize_host("[::1]"), "[::1]");
}

#[test]
fn test_normalize_path_directly() {
    assert_eq!(normalize_path("/a/b/.//./../c"), "/a/c");
    assert_eq!(normalize_path("/../../a"), "/a");
    assert_eq!(normalize_path("/a/b/.."), "/a/");
}

#[test]
fn test_remove_extra_dots() {
    assert_eq!(
        remove_extra_dots(".s.o.m.e..w.e.b.s.i.t.e...c.o.m..."),
        "s.o.m.e.w.e.b.s.i.t.e.c.o.m"
    );
    assert_eq!(remove_extra_dots("example.com"), "example.com");
    assert_eq!(remove_extra_dots("..."), "");
}

#[test]
fn test_percent_round_trip() {
    assert_eq!(percent_decode("%2525252525252525"), "%");
    assert_eq!(percent_decode("a%20b"), "a b");
    assert_eq!(percent_encode("a b"), "a%20b");
    assert_eq!(percent_encode(&percent_decode("/a%2Fb")), "/a/b");
}

#[test]
fn test_create_errors() {
    assert_eq!(NormalizedUrl::create(""), Err(Error::NoUrlFound));
    assert_eq!(
        NormalizedUrl::create("one.com two.com"),
        Err(Error::MultipleUrlsFound)
    );
}
