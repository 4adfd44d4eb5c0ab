//! Static outlet classification tables. Edit these lists to add or move
//! outlets; nothing else in the workspace hard-codes outlet names.

use crate::types::{MediaBias, MediaSource};

pub const PROGRESSIVE_MEDIA: &[MediaSource] = &[
    MediaSource {
        name: "Hankyoreh",
        bias: MediaBias::Progressive,
        domain: Some("hani.co.kr"),
    },
    MediaSource {
        name: "Kyunghyang Shinmun",
        bias: MediaBias::Progressive,
        domain: Some("khan.co.kr"),
    },
    MediaSource {
        name: "OhmyNews",
        bias: MediaBias::Progressive,
        domain: Some("ohmynews.com"),
    },
    MediaSource {
        name: "Pressian",
        bias: MediaBias::Progressive,
        domain: Some("pressian.com"),
    },
    MediaSource {
        name: "JTBC",
        bias: MediaBias::Progressive,
        domain: Some("jtbc.co.kr"),
    },
    MediaSource {
        name: "Newstapa",
        bias: MediaBias::Progressive,
        domain: Some("newstapa.org"),
    },
    MediaSource {
        name: "Media Today",
        bias: MediaBias::Progressive,
        domain: Some("mediatoday.co.kr"),
    },
];

pub const CONSERVATIVE_MEDIA: &[MediaSource] = &[
    MediaSource {
        name: "Chosun Ilbo",
        bias: MediaBias::Conservative,
        domain: Some("chosun.com"),
    },
    MediaSource {
        name: "JoongAng Ilbo",
        bias: MediaBias::Conservative,
        domain: Some("joongang.co.kr"),
    },
    MediaSource {
        name: "Dong-A Ilbo",
        bias: MediaBias::Conservative,
        domain: Some("donga.com"),
    },
    MediaSource {
        name: "Munhwa Ilbo",
        bias: MediaBias::Conservative,
        domain: Some("munhwa.com"),
    },
    MediaSource {
        name: "TV Chosun",
        bias: MediaBias::Conservative,
        domain: Some("tvchosun.com"),
    },
    MediaSource {
        name: "Channel A",
        bias: MediaBias::Conservative,
        domain: Some("ichannela.com"),
    },
    MediaSource {
        name: "Maeil Business",
        bias: MediaBias::Conservative,
        domain: Some("mk.co.kr"),
    },
    MediaSource {
        name: "Korea Economic Daily",
        bias: MediaBias::Conservative,
        domain: Some("hankyung.com"),
    },
];

pub fn sources_for(bias: MediaBias) -> &'static [MediaSource] {
    match bias {
        MediaBias::Progressive => PROGRESSIVE_MEDIA,
        MediaBias::Conservative => CONSERVATIVE_MEDIA,
    }
}

pub fn names_for(bias: MediaBias) -> Vec<&'static str> {
    sources_for(bias).iter().map(|source| source.name).collect()
}

pub fn domains_for(bias: MediaBias) -> Vec<&'static str> {
    sources_for(bias)
        .iter()
        .filter_map(|source| source.domain)
        .collect()
}

pub fn all_sources() -> impl Iterator<Item = &'static MediaSource> {
    PROGRESSIVE_MEDIA.iter().chain(CONSERVATIVE_MEDIA.iter())
}

/// Look up the lean of an outlet by name or domain, case-insensitively.
/// Substring matching in both directions mirrors how loosely the model
/// reports source names.
pub fn bias_for(name_or_domain: &str) -> Option<MediaBias> {
    let needle = name_or_domain.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    for source in all_sources() {
        let name = source.name.to_lowercase();
        if name.contains(&needle) || needle.contains(&name) {
            return Some(source.bias);
        }
        if let Some(domain) = source.domain {
            if needle.contains(domain) {
                return Some(source.bias);
            }
        }
    }
    None
}
