use std::fmt;

use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

use crate::{
    delivery::poster::PosterSpec,
    element::props::VideoConfig,
    transform::{compiler::AssetRef, step::TransformationStep},
};

const XXH3_SEED: u64 = 0x3c6e_f372_fe94_f82b;

/// Identity-affecting configuration captured at render time.
///
/// Equality is deep value equality over the configuration; pass-through attributes and fallback
/// content are not part of a snapshot.
#[derive(Clone, Debug)]
pub struct ConfigSnapshot {
    config: VideoConfig,
    fingerprint: Fingerprint,
}

impl PartialEq for ConfigSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl ConfigSnapshot {
    /// Capture `config`.
    pub fn capture(config: &VideoConfig) -> Self {
        Self {
            fingerprint: fingerprint_config(config),
            config: config.clone(),
        }
    }

    /// Captured configuration.
    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Stable 128-bit digest of the configuration, for logs and external caches.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

/// Stable configuration fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// `true` iff any identity-affecting field differs.
pub fn should_reload(prev: &ConfigSnapshot, next: &ConfigSnapshot) -> bool {
    prev != next
}

/// Remembers the last rendered snapshot of one element instance.
///
/// Decisions take `&mut self`, so two decisions for the same instance can never overlap.
#[derive(Clone, Debug, Default)]
pub struct ReloadController {
    last: Option<ConfigSnapshot>,
}

impl ReloadController {
    /// Controller that has not seen a render yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `next` as the current snapshot and report whether the element must be recreated.
    ///
    /// The first observation never reloads; it is the initial mount.
    pub fn observe(&mut self, next: ConfigSnapshot) -> bool {
        let reload = match &self.last {
            Some(prev) => should_reload(prev, &next),
            None => false,
        };
        if reload && let Some(prev) = &self.last {
            tracing::debug!(
                from = %prev.fingerprint(),
                to = %next.fingerprint(),
                public_id = %next.config().asset.public_id,
                "asset identity changed, reloading media element"
            );
        }
        self.last = Some(next);
        reload
    }

    /// Last recorded snapshot.
    pub fn current(&self) -> Option<&ConfigSnapshot> {
        self.last.as_ref()
    }
}

fn fingerprint_config(config: &VideoConfig) -> Fingerprint {
    let mut h = StableHasher::new();
    write_asset(&mut h, &config.asset);
    h.write_bool(config.secure);

    h.write_u32(config.source_types.len() as u32);
    for st in &config.source_types {
        h.write_str(st.token());
    }

    write_step(&mut h, &config.params);
    h.write_u32(config.transformation.len() as u32);
    for step in &config.transformation {
        write_step(&mut h, step);
    }

    h.write_u32(config.source_overrides.len() as u32);
    for (st, step) in config.source_overrides.iter() {
        h.write_str(st.token());
        write_step(&mut h, step);
    }

    write_poster(&mut h, config.poster.as_ref());
    h.finish()
}

fn write_asset(h: &mut StableHasher, asset: &AssetRef) {
    h.write_str(&asset.cloud_name);
    h.write_str(&asset.public_id);
    h.write_str(asset.resource_type.as_str());
    write_opt_str(h, asset.format.as_deref());
}

fn write_step(h: &mut StableHasher, step: &TransformationStep) {
    h.write_u32(step.len() as u32);
    for (k, v) in step.iter() {
        h.write_str(k);
        write_json_value(h, v);
    }
}

fn write_poster(h: &mut StableHasher, poster: Option<&PosterSpec>) {
    match poster {
        None => h.write_u8(0),
        Some(PosterSpec::Url(url)) => {
            h.write_u8(1);
            h.write_str(url);
        }
        Some(PosterSpec::Default { secure }) => {
            h.write_u8(2);
            write_opt_bool(h, *secure);
        }
        Some(PosterSpec::Asset(a)) => {
            h.write_u8(3);
            write_opt_str(h, a.cloud_name.as_deref());
            h.write_str(&a.public_id);
            write_opt_str(h, a.resource_type.map(|r| r.as_str()));
            write_opt_str(h, a.format.as_deref());
            write_opt_bool(h, a.secure);
            write_step(h, &a.params);
            h.write_u32(a.transformation.len() as u32);
            for step in &a.transformation {
                write_step(h, step);
            }
        }
    }
}

fn write_opt_str(h: &mut StableHasher, s: Option<&str>) {
    match s {
        Some(s) => {
            h.write_u8(1);
            h.write_str(s);
        }
        None => h.write_u8(0),
    }
}

fn write_opt_bool(h: &mut StableHasher, b: Option<bool>) {
    match b {
        Some(b) => {
            h.write_u8(1);
            h.write_bool(b);
        }
        None => h.write_u8(0),
    }
}

fn write_json_value(h: &mut StableHasher, v: &Value) {
    match v {
        Value::Null => h.write_u8(0),
        Value::Bool(x) => {
            h.write_u8(1);
            h.write_bool(*x);
        }
        Value::Number(n) => {
            h.write_u8(2);
            h.write_str(&n.to_string());
        }
        Value::String(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        Value::Array(items) => {
            h.write_u8(4);
            h.write_u32(items.len() as u32);
            for item in items {
                write_json_value(h, item);
            }
        }
        Value::Object(map) => {
            // Map iteration is key-sorted.
            h.write_u8(5);
            h.write_u32(map.len() as u32);
            for (k, v) in map {
                h.write_str(k);
                write_json_value(h, v);
            }
        }
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> Fingerprint {
        let v = self.inner.digest128();
        Fingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/reload.rs"]
mod tests;
