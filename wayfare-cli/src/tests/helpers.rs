//! Test doubles and filesystem helpers for the CLI tests.

use super::*;
use crate::resolve::{ProvidersBuilder, ResolveConfig};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;
use wayfare_core::test_support::FailingProviders;
use wayfare_resolver::Providers;

/// Hands out failing stubs so no test touches the network.
#[derive(Debug, Default)]
pub(super) struct FailingProvidersBuilder {
    pub(super) failing: FailingProviders,
}

impl ProvidersBuilder for FailingProvidersBuilder {
    fn build(&self, _config: &ResolveConfig) -> Result<Providers, CliError> {
        Ok(Providers {
            images: self.failing.images.clone(),
            places: self.failing.places.clone(),
            geocoder: self.failing.geocoder.clone(),
            neighbors: self.failing.neighbors.clone(),
            countries: self.failing.countries.clone(),
        })
    }
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}
