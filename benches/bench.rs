fn main() {
  // Run registered benchmarks.
  divan::main();
}

mod version {
  use version_scheme::tokenize;
  use version_scheme::Version;

  #[divan::bench]
  fn tokenize_text() -> usize {
    tokenize("1.2.3-alpha.10+build.2024").len()
  }

  #[divan::bench]
  fn to_string() -> usize {
    Version::new("1.2.3-alpha.10+build.2024").to_string().len()
  }
}

mod compare {
  use std::cmp::Ordering;

  use version_scheme::BuiltinVersionScheme;
  use version_scheme::Version;
  use version_scheme::VersionScheme;

  fn compare_under(scheme: BuiltinVersionScheme) -> Ordering {
    let left = Version::new("1.2.3-rc.1+20240101");
    let right = Version::new("1.2.3-rc.1+20240102");
    scheme.compare(&left, &right)
  }

  #[divan::bench]
  fn maven_default() -> Ordering {
    compare_under(BuiltinVersionScheme::MavenDefault)
  }

  #[divan::bench]
  fn semver_default() -> Ordering {
    compare_under(BuiltinVersionScheme::SemverDefault)
  }

  #[divan::bench]
  fn semver_build_ordered() -> Ordering {
    compare_under(BuiltinVersionScheme::SemverBuildOrdered)
  }

  #[divan::bench]
  fn normalize() -> usize {
    BuiltinVersionScheme::SemverBuildFirst
      .normalize_version_text(" 20240101+1.2.3 ")
      .unwrap()
      .len()
  }
}

mod interval {
  use std::sync::Arc;

  use version_scheme::BuiltinVersionScheme;
  use version_scheme::IntervalBoundary;
  use version_scheme::Version;
  use version_scheme::VersionInterval;
  use version_scheme::VersionScheme;

  fn interval(left: &str, right: &str) -> VersionInterval {
    let scheme: Arc<dyn VersionScheme> =
      Arc::new(BuiltinVersionScheme::SemverDefault);
    VersionInterval::new(
      IntervalBoundary::Closed,
      Some(Version::new(left)),
      IntervalBoundary::Open,
      Some(Version::new(right)),
      scheme,
    )
    .unwrap()
  }

  #[divan::bench]
  fn intersect() -> bool {
    let a = interval("1.0.0", "2.0.0");
    let b = interval("1.5.0", "3.0.0");
    a.try_intersect(&b).is_some()
  }

  #[divan::bench]
  fn contains() -> bool {
    interval("1.0.0", "2.0.0").contains(&Version::new("1.9.9+meta"))
  }
}
