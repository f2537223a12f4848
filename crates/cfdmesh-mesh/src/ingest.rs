//! Builds a [`Mesh`] from a [`MeshSource`] and the set of cell labels this
//! rank owns.
//!
//! Ingestion never assumes anything about the source beyond its label-keyed
//! contract: every entity this rank touches (locally owned cells, their
//! ghost neighbours, the faces and vertices those cells reference) is
//! discovered by following labels outward from `assigned_cells`, not by
//! scanning the whole source.

use cfdmesh_comm::Communicator;
use cfdmesh_common::{distinct_array, Label, MeshError};
use cfdmesh_graph::ConnectivityGraph;

use crate::mesh::{FaceOtherSideLabel, Mesh};
use crate::source::MeshSource;

fn sorted_distinct(mut labels: Vec<Label>) -> Vec<Label> {
    labels.sort();
    distinct_array(&labels)
}

/// Assembles a finalized [`Mesh`] covering `assigned_cells` and whatever
/// ghost cells the source's connectivity draws in.
pub fn ingest_mesh(
    source: &dyn MeshSource,
    assigned_cells: &[Label],
    comm: Box<dyn Communicator>,
) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::new(comm);

    // 1. connectivity graph: register assigned cells, draw edges to their
    // neighbours (local or not), then let the graph discover ghosts.
    for &label in assigned_cells {
        mesh.graph_mut().add_node(label)?;
    }
    let neighbour_labels = source.cell_neighbour_labels(assigned_cells);
    for (&cell, neighbours) in assigned_cells.iter().zip(neighbour_labels.iter()) {
        for &n in neighbours {
            mesh.graph_mut().add_neighbour(cell, n)?;
        }
    }
    mesh.graph_mut().finalize()?;

    let locals: Vec<Label> = mesh.graph().local_nodes()?.to_vec();
    let ghosts: Vec<Label> = mesh.graph().ghost_nodes()?.to_vec();
    let all_cells: Vec<Label> = locals.iter().chain(ghosts.iter()).copied().collect();

    // 2. faces referenced by locally-owned cells.
    let face_labels = sorted_distinct(
        source
            .cell_face_labels(&locals)
            .into_iter()
            .flatten()
            .collect(),
    );

    // 3. partition into boundary/interior faces, then resolve the boundary
    // label each boundary face sits on.
    let is_boundary = source.face_is_boundary(&face_labels);
    debug_assert_eq!(is_boundary.len(), face_labels.len());

    let face_attrs = source.face_attributes(&face_labels);
    let boundary_labels: Vec<Label> = sorted_distinct(
        face_attrs.iter().filter_map(|f| f.boundary).collect(),
    );
    let boundary_attrs = source.boundary_attributes(&boundary_labels);

    // 4. vertices referenced by those faces and boundaries.
    let vertex_labels = sorted_distinct(
        face_attrs
            .iter()
            .flat_map(|f| f.vertices.iter().copied())
            .chain(boundary_attrs.iter().flat_map(|b| b.vertices.iter().copied()))
            .collect(),
    );

    // 5. regions.
    let region_labels = source.region_labels();
    let region_attrs = source.region_attributes(&region_labels);

    // 6. build entity tables in dependency order.
    for (&label, position) in vertex_labels.iter().zip(source.vertex_positions(&vertex_labels)) {
        mesh.add_vertex(label, position)?;
    }

    for (&label, attrs) in region_labels.iter().zip(region_attrs.iter()) {
        mesh.add_region(
            label,
            attrs.kind,
            attrs.name.clone(),
            attrs.density,
            attrs.turb_ke,
            attrs.turb_diss,
        )?;
    }

    let cell_attrs = source.cell_attributes(&all_cells);
    for (&label, attrs) in all_cells.iter().zip(cell_attrs.iter()) {
        let is_local = locals.contains(&label);
        let id = mesh.add_cell(label, attrs.center, attrs.volume, is_local)?;
        mesh.set_cell_geometry_counts(id, attrs.n_faces, attrs.n_vertices)?;
    }

    for (&label, attrs) in boundary_labels.iter().zip(boundary_attrs.iter()) {
        mesh.add_boundary(
            label,
            attrs.region,
            &attrs.vertices,
            attrs.distance,
        )?;
    }

    for (&label, attrs) in face_labels.iter().zip(face_attrs.iter()) {
        let other_side = match attrs.boundary {
            Some(b) => FaceOtherSideLabel::Boundary(b),
            None => FaceOtherSideLabel::Cell(attrs.cell2.ok_or(MeshError::UnknownLabel {
                kind: "face other-side cell",
                label: label.0,
            })?),
        };
        mesh.add_face(
            label,
            attrs.cell1,
            other_side,
            &attrs.vertices,
            attrs.lambda,
            attrs.normal,
            attrs.center,
            attrs.xpac,
            attrs.xnac,
            attrs.rlencos,
            attrs.area,
        )?;
    }

    // 7. reorder locals before ghosts and freeze structural adds.
    mesh.finalize()?;

    Ok(mesh)
}
