use crate::models::WeekView;

pub fn render_index(view: &WeekView) -> String {
    let view_json = serde_json::to_string(view)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    INDEX_HTML
        .replace("{{MONTH}}", &view.month_label)
        .replace("{{YEAR}}", &view.display_year.to_string())
        .replace("{{WEEK}}", &view.week.to_string())
        .replace("{{VIEW_JSON}}", &view_json)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Contacts Per Day</title>
  <style>
    body {
      margin: 0;
      padding: 32px 18px;
      font-family: "Trebuchet MS", sans-serif;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 16px;
    }

    h1 {
      margin: 0;
    }

    .month {
      text-align: right;
      font-weight: 600;
    }

    .nav {
      display: flex;
      align-items: center;
      justify-content: center;
      gap: 12px;
    }

    .nav button[hidden] {
      display: none;
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: currentColor;
      stroke-width: 2;
    }

    .chart-point {
      fill: white;
      stroke: currentColor;
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(0, 0, 0, 0.12);
    }

    .chart-label {
      font-size: 11px;
    }

    .loader {
      text-align: center;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Number of Contacts Per Day</h1>
    <div class="month" id="month">{{MONTH}} {{YEAR}}</div>
    <div class="nav">
      <button id="prev" type="button" aria-label="Previous week">&#9664;</button>
      <span id="week">Week {{WEEK}}</span>
      <button id="next" type="button" aria-label="Next week">&#9654;</button>
    </div>
    <div class="loader" id="loader" hidden>Loading...</div>
    <svg id="chart" viewBox="0 0 600 300" aria-label="Contacts chart" role="img"></svg>
  </main>

  <script>
    const monthEl = document.getElementById('month');
    const weekEl = document.getElementById('week');
    const prevBtn = document.getElementById('prev');
    const nextBtn = document.getElementById('next');
    const loaderEl = document.getElementById('loader');
    const chartEl = document.getElementById('chart');

    const renderLineChart = (points) => {
      const width = 600;
      const height = 300;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const values = points.map((point) => point.count);
      const max = Math.max(1, ...values);
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / max;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - value * scaleY;

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.count).toFixed(2)}`)
        .join(' ');

      const ticks = 6;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value * 10) / 10}</text>`;
      }

      const xLabels = points
        .map((point, index) => `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.label}</text>`)
        .join('');

      const circles = points
        .map((point, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(point.count)}" r="4" />`)
        .join('');

      chartEl.innerHTML = `
        ${grid}
        <path class="chart-line" d="${path}" />
        ${circles}
        ${xLabels}
      `;
    };

    const render = (view) => {
      monthEl.textContent = `${view.month_label} ${view.display_year}`;
      weekEl.textContent = `Week ${view.week}`;
      prevBtn.hidden = !view.can_go_back;
      nextBtn.hidden = !view.can_go_forward;
      loaderEl.hidden = !view.is_loading;
      chartEl.style.visibility = view.is_loading ? 'hidden' : 'visible';
      renderLineChart(view.points);
    };

    const navigate = async (path) => {
      prevBtn.disabled = true;
      nextBtn.disabled = true;
      loaderEl.hidden = false;
      try {
        const res = await fetch(path, { method: 'POST' });
        if (res.ok) {
          render(await res.json());
        }
      } finally {
        prevBtn.disabled = false;
        nextBtn.disabled = false;
        loaderEl.hidden = true;
      }
    };

    prevBtn.addEventListener('click', () => navigate('/api/week/prev'));
    nextBtn.addEventListener('click', () => navigate('/api/week/next'));

    render({{VIEW_JSON}});
  </script>
</body>
</html>
"#;
