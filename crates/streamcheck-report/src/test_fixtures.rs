//! Cucumber JSON samples shared by the unit tests.

/// One feature: a passing background, a passing scenario and a failing
/// scenario with an embedded PNG.
pub const RUN_JSON: &str = r#"[
  {
    "uri": "features/video_player.feature",
    "id": "video-player",
    "keyword": "Feature",
    "name": "Video player",
    "line": 1,
    "tags": [],
    "elements": [
      {
        "keyword": "Background",
        "type": "background",
        "id": "video-player;background",
        "name": "",
        "line": 6,
        "steps": [
          {"keyword": "Given ", "name": "I open the video site", "line": 7,
           "result": {"status": "passed", "duration": 1500000000}}
        ]
      },
      {
        "keyword": "Scenario",
        "type": "scenario",
        "id": "video-player;search-returns-results",
        "name": "Search returns results",
        "line": 10,
        "tags": [{"name": "@smoke", "line": 9}],
        "steps": [
          {"keyword": "When ", "name": "I search for \"lofi hip hop\"", "line": 11,
           "result": {"status": "passed", "duration": 2000000000}},
          {"keyword": "Then ", "name": "I should see search results", "line": 12,
           "result": {"status": "passed", "duration": 500000000}}
        ]
      },
      {
        "keyword": "Scenario",
        "type": "scenario",
        "id": "video-player;play-and-pause-a-video",
        "name": "Play and pause a video",
        "line": 14,
        "steps": [
          {"keyword": "When ", "name": "I pause the video", "line": 15,
           "result": {"status": "failed", "duration": 5000000000,
                      "error_message": "Timeout: script(<video>.paused) after 5000ms"},
           "embeddings": [{"mime_type": "image/png", "data": "iVBORw0KGgo=", "name": "failure"}]},
          {"keyword": "Then ", "name": "the video should be paused", "line": 16,
           "result": {"status": "skipped"}}
        ]
      }
    ]
  }
]"#;
