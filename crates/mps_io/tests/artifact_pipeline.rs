// crates/mps_io/tests/artifact_pipeline.rs

//! 文件组写出与读回测试

use glam::{DVec2, DVec3};
use mps_config::schema::{layout_keys, PLANAR_LAYOUT, SPATIAL_LAYOUT};
use mps_config::{DamBreak2dScenario, DamBreak3dScenario};
use mps_core::{LatticeClassifier, ThreeTierPlanar, TwoTierSpatial};
use mps_io::{
    read_lattice, read_params, write_artifacts, ControlManifest, Dimension, LatticeHeader,
};
use tempfile::tempdir;

#[test]
fn test_planar_pipeline() {
    let dir = tempdir().unwrap();
    let outdir = dir.path().join("dambreak");
    let scenario = DamBreak2dScenario::default();
    let geometry = scenario.geometry().unwrap();
    let particles = ThreeTierPlanar.classify(&geometry);
    let config = scenario.configuration().unwrap();
    let header = LatticeHeader::DamBreak2d {
        domain: geometry.domain(),
        water: geometry.fluid(),
        spacing: geometry.spacing(),
    };

    let artifacts = write_artifacts(&outdir, &header, &particles, &config).unwrap();
    assert_eq!(
        (artifacts.summary.fluid, artifacts.summary.wall, artifacts.summary.dummy),
        (648, 608, 672)
    );

    let manifest = ControlManifest::read(&artifacts.control_file).unwrap();
    assert_eq!(manifest.particle_file, artifacts.particle_file);
    assert_eq!(manifest.param_file, artifacts.param_file);

    let lattice = read_lattice(&manifest.particle_file).unwrap();
    assert_eq!(lattice.dimension(), Dimension::Planar);
    assert_eq!(lattice.declared, 1928);
    assert_eq!(lattice.summary(), artifacts.summary);
    assert_eq!(
        lattice.comments.first().map(String::as_str),
        Some("MPS 2D Dam Break - Initial Particle Configuration")
    );
    let spacing = lattice.lattice_spacing().unwrap();
    assert!((spacing - 0.008).abs() < 1.0e-9);

    let params = read_params(&manifest.param_file).unwrap();
    let keys: Vec<&str> = params.keys().collect();
    let expected: Vec<&str> = layout_keys(&PLANAR_LAYOUT).collect();
    assert_eq!(keys, expected);
    assert_eq!(params.get("particle_distance"), Some("0.008"));
    assert_eq!(params.get_i64("wall_layers"), Some(4));
    assert_eq!(params.get("output_dir"), Some("output/dambreak"));
}

#[test]
fn test_spatial_pipeline() {
    let dir = tempdir().unwrap();
    let scenario = DamBreak3dScenario::default();
    let geometry = scenario.geometry().unwrap();
    let particles = TwoTierSpatial.classify(&geometry);
    let config = scenario.configuration().unwrap();
    let header = LatticeHeader::DamBreak3d {
        domain: geometry.domain(),
        water: geometry.fluid(),
        spacing: geometry.spacing(),
    };

    let artifacts = write_artifacts(dir.path(), &header, &particles, &config).unwrap();
    assert_eq!(artifacts.summary.fluid, 147);
    assert_eq!(artifacts.summary.wall, 2667);
    assert_eq!(artifacts.summary.dummy, 0);

    let lattice = read_lattice(&artifacts.particle_file).unwrap();
    assert_eq!(lattice.dimension(), Dimension::Spatial);
    assert_eq!(lattice.summary(), artifacts.summary);

    let params = read_params(&artifacts.param_file).unwrap();
    let keys: Vec<&str> = params.keys().collect();
    let expected: Vec<&str> = layout_keys(&SPATIAL_LAYOUT).collect();
    assert_eq!(keys, expected);
    assert_eq!(params.get("wall_repulsion_coeff"), Some("196.2"));
}

#[test]
fn test_dimension_mismatch_rejected() {
    let dir = tempdir().unwrap();
    let scenario = DamBreak2dScenario::default();
    let config = scenario.configuration().unwrap();
    let header = LatticeHeader::DamBreak3d {
        domain: DVec3::ONE,
        water: DVec3::splat(0.5),
        spacing: 0.1,
    };
    let particles = vec![mps_core::Particle::at_rest(DVec2::ZERO, mps_core::ParticleKind::Fluid)];

    assert!(write_artifacts(dir.path(), &header, &particles, &config).is_err());
    assert!(!dir.path().join("particles.txt").exists());
}
