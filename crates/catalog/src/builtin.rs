//! Package set shipped with the client

use crate::Catalog;
use dna_types::PackageSpec;

/// Packages installed by `install --global`, in order
pub const FULL_SUITE: [&str; 8] = [
    "z3bra_mesh",
    "mesh_relay",
    "toroidal_mesh",
    "mesh_3way",
    "mesh_bridge",
    "aura",
    "quantum_vqe",
    "aura_orchestrator",
];

/// The built-in catalog
#[must_use]
pub fn builtin() -> Catalog {
    let packages = vec![
        PackageSpec::new(
            "z3bra_mesh",
            ["z3bra_mesh.py"],
            "Z3BRA Multi-Agent Mesh Network",
        ),
        PackageSpec::new(
            "mesh_relay",
            ["mesh_relay.py"],
            "TCP relay for cross-device mesh",
        ),
        PackageSpec::new(
            "toroidal_mesh",
            ["toroidal_mesh.py"],
            "Helmholtz resonance field visualization",
        ),
        PackageSpec::new(
            "mesh_3way",
            ["mesh_3way.py"],
            "3-way Claude mesh (Samsung/PC/Kali)",
        )
        .with_dependencies(["z3bra_mesh"]),
        PackageSpec::new(
            "mesh_bridge",
            ["mesh_bridge_3way.py"],
            "Human relay to agent mesh bridge",
        ),
        PackageSpec::new(
            "aura",
            ["aura_recursive_engine.py", "aura_organism_compiler.py"],
            "AURA Self-Improvement Engine",
        ),
        PackageSpec::new(
            "quantum_vqe",
            ["quantum_vqe_executor.py"],
            "VQE Quantum Executor",
        ),
        PackageSpec::new(
            "aura_orchestrator",
            ["quantum_aura_orchestrator.py"],
            "Full AURA Quantum Pipeline",
        )
        .with_dependencies(["quantum_vqe", "aura"]),
        PackageSpec::new(
            "lambda_maximizer",
            ["LambdaMaximizer/run_organism.py"],
            "Hardware coherence optimizer",
        ),
        PackageSpec::new(
            "quantumcoin",
            ["quantumcoin_mining.py"],
            "Proof-of-Consciousness mining",
        )
        .with_dependencies(["z3bra_mesh"]),
    ];

    Catalog::from_trusted(
        packages,
        FULL_SUITE.iter().map(ToString::to_string).collect(),
    )
}
