use super::colors::{self, color_for_offset};
use crate::annotate::{twelve_hour_time, AnnotatedFeature, DayPhase};
use crate::clock::LocalObservation;
use html_escape::encode_text;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

pub const INITIAL_LATITUDE: f64 = 20.0;
pub const INITIAL_ZOOM: u8 = 2;

const PLACES_PROPERTY: &str = "places";
const DOCUMENT_TITLE: &str = "World Time Zones";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  html, body { margin: 0; height: 100%; font-family: sans-serif; }
  #map { position: absolute; inset: 0; }
  .panel { position: absolute; z-index: 1000; background: rgba(255, 255, 255, 0.92);
           border-radius: 6px; padding: 10px 14px; box-shadow: 0 1px 5px rgba(0, 0, 0, 0.4);
           font-size: 13px; }
  #info { top: 10px; right: 10px; }
  #info h4 { margin: 0 0 6px; }
  #legend { bottom: 24px; left: 10px; width: 260px; }
  #legend .bar { height: 12px; border-radius: 2px; background: __GRADIENT__; }
  #legend .ticks { display: flex; justify-content: space-between; }
</style>
</head>
<body>
<div id="map"></div>
__INFO_PANEL__
__LEGEND__
<script>
const viewport = __VIEWPORT__;
const zones = __ZONES__;
const map = L.map('map', { worldCopyJump: true }).setView(viewport.center, viewport.zoom);
L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
  attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
  subdomains: 'abcd',
  maxZoom: 19
}).addTo(map);
L.geoJSON(zones, {
  style: feature => feature.properties.style,
  onEachFeature: (feature, layer) => layer.bindTooltip(feature.properties.tooltip, { sticky: true })
}).addTo(map);
</script>
</body>
</html>
"#;


#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize map data: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: [f64; 2],
    pub zoom: u8,
}
impl Viewport {
    pub fn around(observation: &LocalObservation) -> Viewport {
        Viewport {
            center: [INITIAL_LATITUDE, observation.center_longitude],
            zoom: INITIAL_ZOOM,
        }
    }
}

/// Leaflet path options for one polygon.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub color: String,
    pub weight: f64,
}
impl FeatureStyle {
    pub fn of(feature: &AnnotatedFeature) -> FeatureStyle {
        let fill_color = color_for_offset(feature.feature.raw_zone_offset).to_string();

        if feature.clock.is_user_zone {
            return FeatureStyle { fill_color, fill_opacity: 0.85, color: "#222222".into(), weight: 2.5 };
        }

        let fill_opacity = match feature.clock.phase() {
            DayPhase::Night => 0.45,
            DayPhase::Twilight => 0.6,
            DayPhase::Day => 0.7,
        };
        FeatureStyle { fill_color, fill_opacity, color: "#ffffff".into(), weight: 0.5 }
    }
}


pub fn render_document(observation: &LocalObservation, features: &[AnnotatedFeature]) -> Result<String, RenderError> {
    let viewport = serde_json::to_string(&Viewport::around(observation))?;
    let zones = serde_json::to_string(&feature_collection(features)?)?;

    Ok(TEMPLATE
        .replace("__TITLE__", DOCUMENT_TITLE)
        .replace("__GRADIENT__", &colors::css_gradient())
        .replace("__INFO_PANEL__", &info_panel_html(observation))
        .replace("__LEGEND__", &legend_html())
        .replace("__VIEWPORT__", &script_safe(&viewport))
        .replace("__ZONES__", &script_safe(&zones)))
}

/// GeoJSON for the map layer: geometry untouched, annotated fields plus style and tooltip in the properties.
pub fn feature_collection(features: &[AnnotatedFeature]) -> Result<Value, RenderError> {
    let features = features.iter()
        .map(|annotated| -> Result<Value, RenderError> {
            let mut properties: Map<String, Value> = annotated.feature.properties.clone();
            if let Value::Object(clock) = serde_json::to_value(&annotated.clock)? {
                properties.extend(clock);
            }
            properties.insert("phase".into(), serde_json::to_value(annotated.clock.phase())?);
            properties.insert("style".into(), serde_json::to_value(FeatureStyle::of(annotated))?);
            properties.insert("tooltip".into(), Value::String(tooltip_html(annotated)));

            Ok(json!({
                "type": "Feature",
                "geometry": annotated.feature.geometry,
                "properties": properties,
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

pub fn tooltip_html(feature: &AnnotatedFeature) -> String {
    let clock = &feature.clock;
    let mut lines = vec![format!("<b>{}</b>", encode_text(&clock.offset_label))];

    if let Some(places) = feature.feature.properties.get(PLACES_PROPERTY).and_then(Value::as_str) {
        if !places.trim().is_empty() {
            lines.push(encode_text(places.trim()).into_owned());
        }
    }

    lines.push(format!("{} ({})", clock.time_24, clock.time_12));
    lines.push(clock.date_label.clone());
    lines.push(match clock.phase() {
        DayPhase::Night => "Night",
        DayPhase::Twilight => "Dawn / dusk",
        DayPhase::Day => "Day",
    }.to_string());

    if clock.is_user_zone {
        lines.push("<i>Your timezone</i>".to_string());
    }

    lines.join("<br>")
}

pub fn info_panel_html(observation: &LocalObservation) -> String {
    let local = &observation.local_instant;

    format!(
        "<div id=\"info\" class=\"panel\">\n\
         <h4>Your time</h4>\n\
         <div>{zone} ({label})</div>\n\
         <div><b>{time_24}</b> ({time_12})</div>\n\
         <div>{date}</div>\n\
         <div>UTC {utc}</div>\n\
         </div>",
        zone = encode_text(&observation.timezone_name),
        label = observation.offset_label(),
        time_24 = local.format("%H:%M"),
        time_12 = twelve_hour_time(&local.naive_local()),
        date = local.format("%A, %B %d, %Y"),
        utc = observation.utc_instant.format("%H:%M"),
    )
}

pub fn legend_html() -> String {
    format!(
        "<div id=\"legend\" class=\"panel\">\n\
         <div>UTC offset</div>\n\
         <div class=\"bar\"></div>\n\
         <div class=\"ticks\"><span>{}</span><span>0</span><span>+{}</span></div>\n\
         </div>",
        colors::SCALE_MIN, colors::SCALE_MAX,
    )
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
