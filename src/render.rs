//! HTML rendering of a [`Dashboard`].
//!
//! The page is simple enough that it is written straight into a `String`. Maps are Leaflet,
//! charts are Plotly; both get their data as JSON literals embedded in inline scripts.

use std::fmt::{self, Write};

use serde_json::{json, Value};

use crate::configuration::MapSettings;
use crate::dashboard::Dashboard;
use crate::districts::{DistrictTable, HeatBand, SpatialStats};
use crate::heat::HeatCategory;
use crate::imagery::{LstSeries, TileLayer};
use crate::uhi::UhiSummary;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 2rem 2rem 2rem; }
.map { width: 100%; height: 600px; }
.row { display: flex; gap: 1rem; }
.row > * { flex: 1; }
.metric { border: 1px solid #ddd; border-radius: 4px; padding: .5rem 1rem; }
.metric .label { color: #666; font-size: .85rem; }
.metric .value { font-size: 1.6rem; }
.metric .delta { color: #666; font-size: .8rem; }
.error { background: #fde2e1; color: #8a1c1c; padding: .75rem; border-radius: 4px; }
.warning { background: #fff4d6; color: #7a5b00; padding: .75rem; border-radius: 4px; }
.info { background: #e3f0fc; padding: .75rem; border-radius: 4px; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .3rem .6rem; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.caption { color: #888; font-size: .8rem; margin-top: 2rem; }
"#;

/// Page-level knobs that don't come from the refresh cycle.
pub struct PageOptions<'a> {
    pub refresh_interval_secs: u64,
    pub map: &'a MapSettings,
}

pub fn render_page(dashboard: &Dashboard, options: &PageOptions) -> Result<String, fmt::Error> {
    let mut buf = String::with_capacity(16 * 1024);

    writeln!(buf, "<!DOCTYPE html>")?;
    writeln!(buf, "<html>")?;
    writeln!(buf, "<head>")?;
    writeln!(buf, "<meta charset=\"utf-8\">")?;
    writeln!(
        buf,
        "<meta http-equiv=\"refresh\" content=\"{}\">",
        options.refresh_interval_secs
    )?;
    writeln!(buf, "<title>Delhi-NCR Urban Heat Monitoring Dashboard</title>")?;
    writeln!(buf, "<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\"/>")?;
    writeln!(buf, "<script src=\"{LEAFLET_JS}\"></script>")?;
    writeln!(buf, "<script src=\"{PLOTLY_JS}\"></script>")?;
    writeln!(buf, "<style>{STYLE}</style>")?;
    writeln!(buf, "</head>")?;
    writeln!(buf, "<body>")?;

    writeln!(buf, "<h1>Delhi-NCR Urban Heat Monitoring Dashboard</h1>")?;
    writeln!(
        buf,
        "<p>This dashboard combines:</p><ul>\
         <li><b>Real-Time Air temperature</b> (OpenWeather API)</li>\
         <li><b>Satellite-Derived Land Surface Temperature</b> (MODIS LST)</li></ul>\
         <p>Covering <b>Delhi + NCR Region</b>.</p>"
    )?;

    write_lst_map(&mut buf, dashboard, options.map)?;
    write_time_series(&mut buf, dashboard)?;
    write_spatial(&mut buf, dashboard, options.map)?;
    write_live_alerts(&mut buf, &dashboard.districts)?;

    writeln!(
        buf,
        "<p class=\"caption\">Satellite Data Source: MODIS LST | Weather Data Source: OpenWeather API \
         | generated {}</p>",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(buf, "</body>")?;
    writeln!(buf, "</html>")?;
    Ok(buf)
}

fn write_lst_map(buf: &mut String, dashboard: &Dashboard, map: &MapSettings) -> fmt::Result {
    writeln!(buf, "<h2>MODIS Satellite-Derived Daily Land Surface Temperature (LST)</h2>")?;
    if let Err(msg) = &dashboard.overlay {
        write_message(buf, "error", msg)?;
    }
    writeln!(buf, "<div id=\"lst-map\" class=\"map\"></div>")?;

    let overlay = dashboard.overlay.as_ref().ok().map(overlay_json);
    let markers: Vec<Value> = dashboard
        .districts
        .samples
        .iter()
        .map(|s| {
            let category = HeatCategory::classify(s.temperature);
            json!({
                "lat": s.location.latitude,
                "lon": s.location.longitude,
                "color": category.marker_color(),
                "popup": format!(
                    "<b>{}</b><br>Temperature: {:.1} °C<br>Feels Like: {:.1} °C<br>Humidity: {} %<br>Status: {}",
                    escape(s.location.name),
                    s.temperature,
                    s.feels_like,
                    whole_percent(s.humidity),
                    category.alert_message()
                ),
            })
        })
        .collect();

    writeln!(
        buf,
        "<script>\n(function() {{\n\
         const m = L.map('lst-map').setView([{}, {}], {});\n\
         L.tileLayer('{OSM_TILES}', {{attribution: '&copy; OpenStreetMap'}}).addTo(m);\n\
         const overlay = {};\n\
         if (overlay) {{ L.tileLayer(overlay.url_format, {{attribution: overlay.attribution, opacity: overlay.opacity}}).addTo(m); }}\n\
         for (const d of {}) {{\n\
           L.circleMarker([d.lat, d.lon], {{radius: 10, color: d.color, fillColor: d.color, fillOpacity: 0.9}}).bindPopup(d.popup).addTo(m);\n\
         }}\n\
         }})();\n</script>",
        map.center_latitude,
        map.center_longitude,
        map.zoom,
        script_json(&overlay.unwrap_or(Value::Null)),
        script_json(&Value::Array(markers)),
    )
}

fn overlay_json(layer: &TileLayer) -> Value {
    json!({
        "url_format": layer.url_format,
        "attribution": layer.attribution,
        "opacity": layer.opacity,
    })
}

fn write_time_series(buf: &mut String, dashboard: &Dashboard) -> fmt::Result {
    writeln!(
        buf,
        "<h2>Time Series Analysis - Historical MODIS Land Surface Temperature</h2>"
    )?;
    writeln!(
        buf,
        "<form method=\"get\" class=\"row\">\
         <label>Start Date <input type=\"date\" name=\"start\" value=\"{}\"></label>\
         <label>End Date <input type=\"date\" name=\"end\" value=\"{}\"></label>\
         <button type=\"submit\">Apply</button></form>",
        dashboard.picker_start, dashboard.picker_end
    )?;

    let series = match &dashboard.series {
        Ok(series) => series,
        Err(msg) => return write_message(buf, "error", msg),
    };
    let Some(stats) = series.stats() else {
        return write_message(buf, "warning", "No MODIS data available for the selected date range.");
    };

    writeln!(buf, "<div id=\"lst-series\"></div>")?;
    write_plot(buf, "lst-series", &series_trace(series), &json!({
        "title": "MODIS Land Surface Temperature Time Series (Delhi-NCR Region)",
        "xaxis": {"title": "Date"},
        "yaxis": {"title": "Temperature (°C)"},
        "hovermode": "x unified",
        "height": 400,
        "template": "plotly_white",
    }))?;

    writeln!(buf, "<div class=\"row\">")?;
    write_metric(buf, "Average LST", &format!("{:.2}°C", stats.average), None)?;
    write_metric(buf, "Max LST", &format!("{:.2}°C", stats.max), None)?;
    write_metric(buf, "Min LST", &format!("{:.2}°C", stats.min), None)?;
    write_metric(buf, "Data Points", &stats.count.to_string(), None)?;
    writeln!(buf, "</div>")
}

fn series_trace(series: &LstSeries) -> Value {
    let dates: Vec<String> = series.points.iter().map(|p| p.date.to_string()).collect();
    let temps: Vec<f64> = series.points.iter().map(|p| p.mean_celsius).collect();
    json!([{
        "type": "scatter",
        "x": dates,
        "y": temps,
        "mode": "lines+markers",
        "name": "Mean LST",
        "line": {"color": "orangered", "width": 2},
        "marker": {"size": 6},
    }])
}

fn write_spatial(buf: &mut String, dashboard: &Dashboard, map: &MapSettings) -> fmt::Result {
    writeln!(
        buf,
        "<h2>Spatial Distribution Analysis - Temperature Variation Across Districts</h2>"
    )?;
    let table = &dashboard.districts;
    for (location, e) in &table.failures {
        write_message(buf, "warning", &format!("{} unavailable: {}", location.name, e))?;
    }
    let (uhi, stats) = match (&dashboard.uhi, &dashboard.spatial) {
        (Ok(uhi), Some(stats)) => (uhi, stats),
        (Err(msg), _) => return write_message(buf, "error", msg),
        (Ok(_), None) => return Ok(()),
    };

    let names: Vec<&str> = table.samples.iter().map(|s| s.location.name).collect();
    let temps: Vec<f64> = table.samples.iter().map(|s| s.temperature).collect();
    let feels: Vec<f64> = table.samples.iter().map(|s| s.feels_like).collect();
    let rounded: Vec<f64> = temps.iter().map(|t| round2(*t)).collect();

    writeln!(buf, "<div class=\"row\"><div id=\"district-bar\"></div><div id=\"district-scatter\"></div></div>")?;
    write_plot(buf, "district-bar", &json!([{
        "type": "bar",
        "x": names,
        "y": temps,
        "marker": {
            "color": temps,
            "colorscale": "RdYlBu",
            "reversescale": true,
            "showscale": true,
            "colorbar": {"title": "Temp (°C)"},
        },
        "text": rounded,
        "textposition": "outside",
        "name": "Temperature",
    }]), &json!({
        "title": "Current Temperature Distribution Across Districts",
        "xaxis": {"title": "District"},
        "yaxis": {"title": "Temperature (°C)"},
        "height": 400,
        "template": "plotly_white",
        "showlegend": false,
    }))?;
    write_plot(buf, "district-scatter", &json!([{
        "type": "scatter",
        "x": temps,
        "y": feels,
        "mode": "markers+text",
        "marker": {
            "size": 15,
            "color": temps,
            "colorscale": "RdYlBu",
            "reversescale": true,
            "showscale": true,
            "colorbar": {"title": "Temp (°C)"},
        },
        "text": names,
        "textposition": "top center",
        "name": "Districts",
    }]), &json!({
        "title": "Temperature vs Feels Like Temperature",
        "xaxis": {"title": "Actual Temperature (°C)"},
        "yaxis": {"title": "Feels Like Temperature (°C)"},
        "height": 400,
        "template": "plotly_white",
    }))?;

    write_spatial_metrics(buf, stats)?;
    write_comparison_table(buf, table, uhi)?;
    write_heat_map(buf, table, uhi, map)?;
    write_uhi(buf, uhi)
}

fn write_spatial_metrics(buf: &mut String, stats: &SpatialStats) -> fmt::Result {
    writeln!(buf, "<h3>Spatial Temperature Statistics</h3>")?;
    writeln!(buf, "<div class=\"row\">")?;
    write_metric(
        buf,
        "Max Temp District",
        stats.max_district,
        Some(&format!("{:.1}°C", stats.max_temperature)),
    )?;
    write_metric(
        buf,
        "Min Temp District",
        stats.min_district,
        Some(&format!("{:.1}°C", stats.min_temperature)),
    )?;
    write_metric(
        buf,
        "Temperature Range",
        &format!("{:.1}°C", stats.range),
        Some("(Spatial Variation)"),
    )?;
    write_metric(
        buf,
        "Avg Temperature",
        &format!("{:.1}°C", stats.average_temperature),
        Some("(All Districts)"),
    )?;
    write_metric(
        buf,
        "Avg Humidity",
        &format!("{}%", whole_percent(stats.average_humidity)),
        Some("(All Districts)"),
    )?;
    writeln!(buf, "</div>")
}

fn write_comparison_table(buf: &mut String, table: &DistrictTable, uhi: &UhiSummary) -> fmt::Result {
    writeln!(buf, "<h3>Detailed District Comparison</h3>")?;
    writeln!(
        buf,
        "<table><tr><th>District</th><th>Temperature</th><th>Feels Like</th>\
         <th>Humidity</th><th>Temp Anomaly</th></tr>"
    )?;
    for (s, a) in table.samples.iter().zip(&uhi.anomalies) {
        writeln!(
            buf,
            "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td><td>{:.2}</td></tr>",
            escape(s.location.name),
            s.temperature,
            s.feels_like,
            whole_percent(s.humidity),
            a.anomaly
        )?;
    }
    writeln!(buf, "</table>")
}

fn write_heat_map(
    buf: &mut String,
    table: &DistrictTable,
    uhi: &UhiSummary,
    map: &MapSettings,
) -> fmt::Result {
    writeln!(buf, "<h3>Heat Distribution Map</h3>")?;
    writeln!(buf, "<div id=\"heat-map\" class=\"map\"></div>")?;

    let (min, max) = (uhi.min_temperature(), uhi.max_temperature());
    let circles: Vec<Value> = table
        .samples
        .iter()
        .zip(&uhi.anomalies)
        .map(|(s, a)| {
            json!({
                "lat": s.location.latitude,
                "lon": s.location.longitude,
                "color": HeatBand::of(s.temperature, min, max).as_str(),
                "popup": format!(
                    "<b>{}</b><br>Temperature: {:.1}°C<br>Feels Like: {:.1}°C<br>Humidity: {}%<br>Anomaly: {:+.2}°C",
                    escape(s.location.name),
                    s.temperature,
                    s.feels_like,
                    whole_percent(s.humidity),
                    a.anomaly
                ),
            })
        })
        .collect();

    writeln!(
        buf,
        "<script>\n(function() {{\n\
         const m = L.map('heat-map').setView([{}, {}], {});\n\
         L.tileLayer('{OSM_TILES}', {{attribution: '&copy; OpenStreetMap'}}).addTo(m);\n\
         for (const d of {}) {{\n\
           L.circleMarker([d.lat, d.lon], {{radius: 20, color: d.color, fill: true, fillColor: d.color, fillOpacity: 0.7, weight: 2, opacity: 0.9}})\n\
             .bindPopup(d.popup, {{maxWidth: 250}}).addTo(m);\n\
         }}\n\
         }})();\n</script>",
        map.center_latitude,
        map.center_longitude,
        map.zoom,
        script_json(&Value::Array(circles)),
    )
}

fn write_uhi(buf: &mut String, uhi: &UhiSummary) -> fmt::Result {
    writeln!(buf, "<h3>Urban Heat Island (UHI) Analysis</h3>")?;
    writeln!(buf, "<div id=\"uhi-bar\"></div>")?;

    let names: Vec<&str> = uhi.anomalies.iter().map(|a| a.location.name).collect();
    let values: Vec<f64> = uhi.anomalies.iter().map(|a| a.anomaly).collect();
    let colors: Vec<&str> = values
        .iter()
        .map(|v| anomaly_color(*v))
        .collect();
    let rounded: Vec<f64> = values.iter().map(|v| round2(*v)).collect();

    write_plot(buf, "uhi-bar", &json!([{
        "type": "bar",
        "x": names,
        "y": values,
        "marker": {"color": colors},
        "text": rounded,
        "textposition": "outside",
        "name": "UHI Intensity",
    }]), &json!({
        "title": "Urban Heat Island Intensity (Deviation from Mean)",
        "xaxis": {"title": "District"},
        "yaxis": {"title": "Temperature Anomaly (°C)"},
        "height": 400,
        "template": "plotly_white",
        "hovermode": "x unified",
        "showlegend": false,
        "shapes": [{
            "type": "line", "xref": "paper", "x0": 0, "x1": 1, "y0": 0, "y1": 0,
            "line": {"dash": "dash", "color": "gray"},
        }],
    }))?;

    writeln!(buf, "<div class=\"row\">")?;
    writeln!(
        buf,
        "<div class=\"info\"><b>Hottest Zone</b>: {}<ul>\
         <li>Temperature Anomaly: {:+.2}°C (above mean)</li>\
         <li>Actual Temperature: {:.1}°C</li></ul></div>",
        escape(uhi.hottest.location.name),
        uhi.hottest.anomaly,
        uhi.hottest.temperature
    )?;
    writeln!(
        buf,
        "<div class=\"info\"><b>Coolest Zone</b>: {}<ul>\
         <li>Temperature Anomaly: {:.2}°C (below mean)</li>\
         <li>Actual Temperature: {:.1}°C</li></ul></div>",
        escape(uhi.coolest.location.name),
        uhi.coolest.anomaly,
        uhi.coolest.temperature
    )?;
    writeln!(buf, "</div>")
}

fn write_live_alerts(buf: &mut String, table: &DistrictTable) -> fmt::Result {
    writeln!(buf, "<h2>Live Heat Alerts for Delhi-NCR Region</h2>")?;
    writeln!(buf, "<ul>")?;
    for s in &table.samples {
        writeln!(
            buf,
            "<li><b>{}</b>: {:.1} °C, Feels Like: {:.1} °C, Humidity: {} % - {}</li>",
            escape(s.location.name),
            s.temperature,
            s.feels_like,
            whole_percent(s.humidity),
            HeatCategory::classify(s.temperature).alert_message()
        )?;
    }
    writeln!(buf, "</ul>")
}

fn write_plot(buf: &mut String, id: &str, data: &Value, layout: &Value) -> fmt::Result {
    writeln!(
        buf,
        "<script>Plotly.newPlot('{id}', {}, {}, {{responsive: true}});</script>",
        script_json(data),
        script_json(layout)
    )
}

fn write_metric(buf: &mut String, label: &str, value: &str, delta: Option<&str>) -> fmt::Result {
    write!(
        buf,
        "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div>",
        escape(label),
        escape(value)
    )?;
    if let Some(delta) = delta {
        write!(buf, "<div class=\"delta\">{}</div>", escape(delta))?;
    }
    writeln!(buf, "</div>")
}

fn write_message(buf: &mut String, class: &str, msg: &str) -> fmt::Result {
    writeln!(buf, "<div class=\"{class}\">{}</div>", escape(msg))
}

/// Bar color on the UHI chart: only districts above the mean are red.
fn anomaly_color(anomaly: f64) -> &'static str {
    if anomaly > 0.0 {
        "red"
    } else {
        "blue"
    }
}

/// Humidity as shown everywhere on the page; halves go to the even neighbour.
fn whole_percent(v: f64) -> i64 {
    v.round_ties_even() as i64
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// JSON literal safe to drop inside a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LstPoint, WeatherSample, LOCATIONS};
    use chrono::{NaiveDate, Utc};

    fn map() -> MapSettings {
        MapSettings {
            center_latitude: 28.6139,
            center_longitude: 77.2090,
            zoom: 10,
        }
    }

    fn dashboard(temps: &[f64]) -> Dashboard {
        let samples: Vec<WeatherSample> = temps
            .iter()
            .zip(LOCATIONS.iter())
            .map(|(t, l)| WeatherSample {
                location: *l,
                temperature: *t,
                feels_like: t + 2.0,
                humidity: 35.0,
            })
            .collect();
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let uhi = UhiSummary::compute(&samples).map_err(|e| e.to_string());
        let table = DistrictTable {
            samples,
            failures: Vec::new(),
        };
        Dashboard {
            generated_at: Utc::now(),
            picker_start: start,
            picker_end: start,
            overlay: Err("no images found between 2025-12-31 and 2026-01-30".into()),
            spatial: table.spatial_stats(),
            districts: table,
            series: Ok(LstSeries {
                points: vec![LstPoint { date: start, mean_celsius: 23.456 }],
            }),
            uhi,
        }
    }

    fn render(d: &Dashboard) -> String {
        let map = map();
        render_page(d, &PageOptions { refresh_interval_secs: 60, map: &map }).unwrap()
    }

    #[test]
    fn full_page_has_every_section() {
        let html = render(&dashboard(&[41.0, 37.0, 33.0, 30.0, 34.0]));

        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"60\">"));
        assert!(html.contains("no images found between 2025-12-31 and 2026-01-30"));
        assert!(html.contains("23.46°C"));
        assert!(html.contains("<b>Hottest Zone</b>: Delhi"));
        assert!(html.contains("+6.00°C (above mean)"));
        assert!(html.contains("<b>Coolest Zone</b>: Faridabad"));
        assert!(html.contains("<td>Faridabad</td><td>30.00</td><td>32.00</td><td>35</td><td>-5.00</td>"));
        assert!(html.contains("Extreme Heat Alert!"));
        assert!(html.contains("name=\"start\" value=\"2026-01-01\""));
    }

    #[test]
    fn empty_table_renders_error_in_place() {
        let html = render(&dashboard(&[]));

        assert!(html.contains("<div class=\"error\">invalid input: no samples to summarize</div>"));
        assert!(!html.contains("Hottest Zone"));
        assert!(html.contains("Live Heat Alerts"));
    }

    #[test]
    fn overlay_tiles_reach_the_map_script() {
        let mut d = dashboard(&[41.0, 37.0]);
        d.overlay = Ok(TileLayer {
            url_format: "https://tiles.example/v1/maps/lst/{z}/{x}/{y}".into(),
            name: "MODIS LST Smooth Heat Map (°C)",
            attribution: "Google Earth Engine",
            opacity: 0.5,
            min: 25.0,
            max: 50.0,
            palette: &crate::imagery::VIS_PALETTE,
        });
        let html = render(&d);

        assert!(html.contains("\"url_format\":\"https://tiles.example/v1/maps/lst/{z}/{x}/{y}\""));
        assert!(html.contains("\"opacity\":0.5"));
        assert!(html.contains("\"attribution\":\"Google Earth Engine\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn uhi_bars_are_red_only_above_the_mean() {
        assert_eq!(anomaly_color(0.1), "red");
        assert_eq!(anomaly_color(0.0), "blue");
        assert_eq!(anomaly_color(-0.1), "blue");
    }

    #[test]
    fn uhi_chart_colors_follow_anomaly_sign() {
        // mean 35: Delhi +1, Gurgaon 0, Noida -1
        let html = render(&dashboard(&[36.0, 35.0, 34.0]));
        assert!(html.contains("\"marker\":{\"color\":[\"red\",\"blue\",\"blue\"]}"));
    }

    #[test]
    fn humidity_rounds_the_same_everywhere() {
        let mut d = dashboard(&[30.0]);
        d.districts.samples[0].humidity = 40.5;
        d.spatial = d.districts.spatial_stats();
        let html = render(&d);

        assert!(html.contains("<td>Delhi</td><td>30.00</td><td>32.00</td><td>40</td><td>0.00</td></tr>"));
        assert!(html.contains("Humidity: 40%"));
        assert!(html.contains("Humidity: 40 %"));
        assert!(html.contains("<div class=\"value\">40%</div>"));
        assert!(!html.contains("Humidity: 41"));
        assert_eq!(whole_percent(41.5), 42);
        assert_eq!(whole_percent(35.2), 35);
    }

    #[test]
    fn readings_keep_one_decimal() {
        let html = render(&dashboard(&[41.0]));
        assert!(html.contains("<b>Delhi</b>: 41.0 °C, Feels Like: 43.0 °C"));
        assert!(html.contains("Temperature: 41.0 °C<br>Feels Like: 43.0 °C"));
    }

    #[test]
    fn empty_series_is_a_warning() {
        let mut d = dashboard(&[30.0]);
        d.series = Ok(LstSeries::default());
        let html = render(&d);
        assert!(html.contains("No MODIS data available for the selected date range."));
    }

    #[test]
    fn script_json_cannot_close_the_script() {
        let v = json!({"popup": "</script><script>alert(1)</script>"});
        assert!(!script_json(&v).contains("</script>"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
