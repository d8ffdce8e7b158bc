use super::report::{drift_summary, plan_rows};
use crate::delay::Delay;
use crate::domain::HumanDuration;
use crate::error::{Error, Result};

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<script src="{{chart_js}}"></script>
<style>
  body { font-family: sans-serif; margin: 2rem; color: #222; }
  h1 { font-size: 1.3rem; }
  .summary { color: #666; margin-bottom: 1rem; }
  .chart { position: relative; max-width: 960px; height: 480px; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<p class="summary">{{summary}}</p>
<div class="chart"><canvas id="plan"></canvas></div>
<script>
const plan = {{data}};
new Chart(document.getElementById("plan"), {
  data: {
    labels: plan.map((row) => row.attempt),
    datasets: [
      {
        type: "bar",
        label: "Wait (s)",
        data: plan.map((row) => row.wait_seconds),
        yAxisID: "wait",
        backgroundColor: "rgba(54, 162, 235, 0.6)",
      },
      {
        type: "line",
        label: "Elapsed (s)",
        data: plan.map((row) => row.elapsed_seconds),
        yAxisID: "elapsed",
        borderColor: "rgba(255, 99, 132, 0.9)",
        tension: 0.2,
      },
    ],
  },
  options: {
    maintainAspectRatio: false,
    scales: {
      x: { title: { display: true, text: "Attempt" } },
      wait: { type: "linear", position: "left", beginAtZero: true, title: { display: true, text: "Wait (s)" } },
      elapsed: { type: "linear", position: "right", beginAtZero: true, grid: { drawOnChartArea: false }, title: { display: true, text: "Elapsed (s)" } },
    },
  },
});
</script>
</body>
</html>
"#;

/// Renders a standalone HTML page charting per-attempt waits (bars) and
/// cumulative elapsed time (line).
pub fn render_chart(delay: &Delay) -> Result<String> {
    let config = delay.config();
    let title = format!(
        "Delay plan: {} strategy, {} over {} attempts, exponent {}",
        delay.strategy(),
        HumanDuration(config.total_duration),
        config.attempts,
        config.exponent
    );
    let summary = drift_summary(delay);

    let rows = plan_rows(delay);
    let data = serde_json::to_string(&rows).map_err(Error::JsonSerialize)?;

    Ok(TEMPLATE
        .replace("{{title}}", &escape_html(&title))
        .replace("{{summary}}", &escape_html(&summary))
        .replace("{{chart_js}}", CHART_JS_URL)
        .replace("{{data}}", &escape_script(&data)))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample() -> Delay {
        Delay::exponential(Duration::from_secs(30), 10, 2.0)
    }

    #[test]
    fn embeds_rows_as_json() {
        let html = render_chart(&sample()).unwrap();

        assert!(html.contains(r#"{"attempt":1,"wait_seconds":0.0,"elapsed_seconds":0.0}"#));
        assert!(html.contains(r#"{"attempt":10,"wait_seconds":9.0,"elapsed_seconds":31.0}"#));
    }

    #[test]
    fn includes_bar_and_line_datasets() {
        let html = render_chart(&sample()).unwrap();

        assert!(html.contains(r#"type: "bar""#));
        assert!(html.contains(r#"type: "line""#));
        assert!(html.contains(CHART_JS_URL));
    }

    #[test]
    fn title_describes_inputs() {
        let html = render_chart(&sample()).unwrap();

        assert!(html.contains(
            "<title>Delay plan: exponential strategy, 30s over 10 attempts, exponent 2</title>"
        ));
        assert!(html.contains("drift +1s"));
    }

    #[test]
    fn leaves_no_placeholders() {
        let html = render_chart(&sample()).unwrap();
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_plan_renders_empty_dataset() {
        let delay = Delay::exponential(Duration::from_secs(30), 10, -2.0);
        let html = render_chart(&delay).unwrap();
        assert!(html.contains("const plan = [];"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
        assert_eq!(escape_script(r#"["</script>"]"#), r#"["<\/script>"]"#);
    }
}
