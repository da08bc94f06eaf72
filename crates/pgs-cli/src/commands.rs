//! Subcommand implementations.
//!
//! Each command drives a [`Session`] against the configured backend, the
//! same way a map host embeds the engine, and renders the resulting
//! state as a table.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, bail};
use comfy_table::{Table, presets::UTF8_FULL};

use pgs_editor::{EditorState, Message};
use pgs_model::{FeatureId, LayerId};
use pgs_remote::{HttpApi, RemoteConfig, Session, loader};

/// List the layer catalog.
pub async fn run_layers(config: &RemoteConfig) -> anyhow::Result<()> {
    let mut session = connect(config)?;
    session.process(Message::LoadLayerCatalog).await;
    let state = session.state();
    fail_on_fetch_error(&state, "load the layer catalog")?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Editable"]);
    for layer in state.layers.iter() {
        table.add_row(vec![
            layer.id.to_string(),
            layer.title.clone(),
            if layer.editable { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "{} layers ({} editable)",
        state.layers.len(),
        state.editable_layers().count()
    );
    Ok(())
}

/// List editable features, either one layer's or every editable layer's.
pub async fn run_features(config: &RemoteConfig, layer: Option<u64>) -> anyhow::Result<()> {
    let mut session = connect(config)?;

    match layer {
        Some(id) => {
            session
                .process(Message::SetEditableLayers(BTreeSet::from([LayerId::new(
                    id,
                )])))
                .await;
        }
        None => {
            session.process(Message::LoadLayerCatalog).await;
            fail_on_fetch_error(&session.state(), "load the layer catalog")?;
            let editable: BTreeSet<LayerId> =
                session.state().editable_layers().map(|l| l.id).collect();
            session.process(Message::LoadAllFeatures).await;
            session.process(Message::SetEditableLayers(editable)).await;
        }
    }
    let state = session.state();
    fail_on_fetch_error(&state, "load features")?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Layer", "Exterior vertices"]);
    for feature in state.features.iter() {
        table.add_row(vec![
            match feature.id {
                FeatureId::Persisted(id) => id.to_string(),
                FeatureId::Draft(_) => "draft".to_string(),
            },
            feature.title().to_string(),
            feature
                .layer_id()
                .map_or_else(|| "-".to_string(), |l| l.to_string()),
            feature.geometry.exterior().coords().count().to_string(),
        ]);
    }
    println!("{table}");
    println!("{} features", state.features.len());
    Ok(())
}

/// Summarize the read-only display dataset.
pub async fn run_dataset(config: &RemoteConfig) -> anyhow::Result<()> {
    let api = HttpApi::new(config).context("failed to build HTTP client")?;
    let dataset = loader::fetch_read_only_dataset(&api)
        .await
        .context("failed to load the read-only dataset")?;
    println!(
        "{} geometries ({} areal)",
        dataset.geometry_count(),
        dataset.areal_count()
    );
    Ok(())
}

fn connect(config: &RemoteConfig) -> anyhow::Result<Session> {
    let api = HttpApi::new(config).context("failed to build HTTP client")?;
    Ok(Session::new(Arc::new(api)))
}

fn fail_on_fetch_error(state: &EditorState, action: &str) -> anyhow::Result<()> {
    if let Some(error) = &state.last_error {
        bail!("could not {action}: {error}");
    }
    Ok(())
}
