// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Endpoint tests against a local one-shot HTTP server
//!
//! Each test serves a single canned response on an ephemeral port, points the
//! client at it through a non-443 `api_port`, and checks what arrived on the
//! wire: method, path, parameters and a signature that verifies over the path
//! actually sent.

use panda_sdk::{
	Api, Client, ClientOptions, Credentials, EncodeOptions, EncodingFilter, ModelError,
	NotificationEvents, Notifications, PandaError, Params, Profile, ProfileRef, Signer,
	signing::SIGNATURE_PARAM,
};
use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::{TcpListener, TcpStream},
	task::JoinHandle,
};
use url::form_urlencoded;

const CLOUD_ID: &str = "cloud-1";

/// Request as received by the server
struct Received {
	method: String,
	path: String,
	params: Params,
	content_type: String,
	body: String,
}

struct Server {
	api: Api,
	signer: Signer,
	request: JoinHandle<Received>,
}

impl Server {
	/// Wait for the request and check its signature
	async fn received(self) -> Received {
		let received = self.request.await.unwrap();
		assert_signed(&self.signer, &received, received.params.clone());
		received
	}
}

/// Serve `response` with `status` to the first connection
async fn serve(status: u16, response: &'static str) -> Server {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let port = listener.local_addr().unwrap().port();

	let request = tokio::spawn(async move {
		let (mut stream, _) = listener.accept().await.unwrap();
		let received = read_request(&mut stream).await;

		let reply = format!(
			"HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			response.len(),
			response
		);
		stream.write_all(reply.as_bytes()).await.unwrap();
		stream.shutdown().await.ok();
		received
	});

	let signer = Signer::new(Credentials::new("access", "secret", "127.0.0.1"), CLOUD_ID);
	let client = Client::with_options(
		signer.clone(),
		ClientOptions {
			api_port: port,
			use_system_proxy: false,
			..Default::default()
		},
	)
	.unwrap();

	Server {
		api: Api::new(client),
		signer,
		request,
	}
}

async fn read_request(stream: &mut TcpStream) -> Received {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 4096];

	let head_len = loop {
		if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
			break pos + 4;
		}
		let read = stream.read(&mut chunk).await.unwrap();
		assert!(read > 0, "connection closed before the request head");
		buf.extend_from_slice(&chunk[..read]);
	};

	let head = String::from_utf8_lossy(&buf[..head_len]).into_owned();
	let mut lines = head.lines();
	let mut request_line = lines.next().unwrap().split(' ');
	let method = request_line.next().unwrap().to_string();
	let target = request_line.next().unwrap().to_string();

	let headers: Vec<(String, String)> = lines
		.filter_map(|line| line.split_once(':'))
		.map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
		.collect();
	let header = |name: &str| {
		headers
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
	};

	let length: usize = header("content-length")
		.map(|value| value.parse().unwrap())
		.unwrap_or(0);
	while buf.len() < head_len + length {
		let read = stream.read(&mut chunk).await.unwrap();
		assert!(read > 0, "connection closed before the request body");
		buf.extend_from_slice(&chunk[..read]);
	}
	let body = &buf[head_len..head_len + length];

	let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
	let content_type = header("content-type").unwrap_or_default();

	let mut params: Params = form_urlencoded::parse(query.as_bytes())
		.into_owned()
		.collect();
	if content_type == "application/x-www-form-urlencoded" {
		params.extend(form_urlencoded::parse(body).into_owned());
	}

	Received {
		method,
		path: path.to_string(),
		params,
		content_type,
		body: String::from_utf8_lossy(body).into_owned(),
	}
}

fn assert_signed(signer: &Signer, received: &Received, mut params: Params) {
	if received.content_type.starts_with("multipart/form-data") {
		return;
	}
	let signature = params
		.remove(SIGNATURE_PARAM)
		.expect("request carries a signature");
	let path = received.path.strip_prefix("/v2").unwrap();

	assert_eq!(signature, signer.signature(&received.method, path, &params));
	assert_eq!(params.get("cloud_id").map(String::as_str), Some(CLOUD_ID));
	assert_eq!(params.get("access_key").map(String::as_str), Some("access"));
}

fn param<'a>(received: &'a Received, key: &str) -> Option<&'a str> {
	received.params.get(key).map(String::as_str)
}

/// Text fields of a multipart body, keyed by part name
fn multipart_fields(received: &Received) -> Params {
	let boundary = received
		.content_type
		.split_once("boundary=")
		.map(|(_, boundary)| format!("--{}", boundary))
		.unwrap();

	received
		.body
		.split(boundary.as_str())
		.filter_map(|part| part.trim_start_matches("\r\n").split_once("\r\n\r\n"))
		.filter(|(headers, _)| !headers.contains("filename="))
		.filter_map(|(headers, value)| {
			let name = headers.split_once("name=\"")?.1.split_once('"')?.0;
			Some((name.to_string(), value.trim_end_matches("\r\n").to_string()))
		})
		.collect()
}

#[tokio::test]
async fn test_cloud_uses_bound_cloud_id() {
	let server = serve(200, r#"{"id":"cloud-1","name":"my_cloud"}"#).await;

	let cloud = server.api.cloud().await.unwrap();
	let received = server.received().await;

	assert_eq!(cloud.name.as_deref(), Some("my_cloud"));
	assert_eq!(received.method, "GET");
	assert_eq!(received.path, "/v2/clouds/cloud-1.json");
}

#[tokio::test]
async fn test_update_cloud_is_put() {
	let server = serve(200, r#"{"id":"cloud-1","name":"renamed"}"#).await;

	let params = Params::from([("name".to_string(), "renamed".to_string())]);
	server.api.update_cloud(params).await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "PUT");
	assert_eq!(received.path, "/v2/clouds/cloud-1.json");
	assert_eq!(param(&received, "name"), Some("renamed"));
}

#[tokio::test]
async fn test_videos_list() {
	let server = serve(200, r#"[{"id":"v1"},{"id":"v2"}]"#).await;

	let videos = server.api.videos().await.unwrap();
	let received = server.received().await;

	assert_eq!(videos.len(), 2);
	assert_eq!(received.method, "GET");
	assert_eq!(received.path, "/v2/videos.json");
}

#[tokio::test]
async fn test_videos_page_includes_root() {
	let server = serve(
		200,
		r#"{"videos":[{"id":"v3"}],"page":2,"per_page":10,"total":11}"#,
	)
	.await;

	let page = server.api.videos_page(2, 10).await.unwrap();
	let received = server.received().await;

	assert_eq!(page.page, 2);
	assert_eq!(page.total, 11);
	assert_eq!(page.videos[0].id.as_deref(), Some("v3"));
	assert_eq!(received.path, "/v2/videos.json");
	assert_eq!(param(&received, "include_root"), Some("true"));
	assert_eq!(param(&received, "page"), Some("2"));
	assert_eq!(param(&received, "per_page"), Some("10"));
}

#[tokio::test]
async fn test_video_id_is_escaped_and_signed_as_sent() {
	let server = serve(200, r#"{"id":"x?y=1#z"}"#).await;

	let video = server.api.video("x?y=1#z").await.unwrap();
	let received = server.received().await;

	assert_eq!(video.id.as_deref(), Some("x?y=1#z"));
	assert_eq!(received.path, "/v2/videos/x%3Fy%3D1%23z.json");
	assert_eq!(param(&received, "y"), None);
}

#[tokio::test]
async fn test_video_metadata_is_untyped() {
	let server = serve(200, r#"{"width":320,"video":{"codec":"h264"}}"#).await;

	let metadata = server.api.video_metadata("v1").await.unwrap();
	let received = server.received().await;

	assert_eq!(metadata["width"], 320);
	assert_eq!(received.path, "/v2/videos/v1/metadata.json");
}

#[tokio::test]
async fn test_video_encodings_with_filter() {
	let server = serve(200, r#"[{"id":"e1","video_id":"v1","status":"success"}]"#).await;

	let filter = EncodingFilter {
		status: Some("success".to_string()),
		..Default::default()
	};
	let encodings = server.api.video_encodings("v1", &filter).await.unwrap();
	let received = server.received().await;

	assert_eq!(encodings[0].id.as_deref(), Some("e1"));
	assert_eq!(received.path, "/v2/videos/v1/encodings.json");
	assert_eq!(param(&received, "status"), Some("success"));
}

#[tokio::test]
async fn test_encode_video_url_posts_form() {
	let server = serve(201, r#"{"id":"v9","status":"processing"}"#).await;

	let options = EncodeOptions {
		profiles: vec!["h264".to_string(), "webm".to_string()],
		payload: Some("a*b c".to_string()),
		..Default::default()
	};
	let video = server
		.api
		.encode_video_url("http://example.com/clip.mp4", &options)
		.await
		.unwrap();
	let received = server.received().await;

	assert_eq!(video.status.as_deref(), Some("processing"));
	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/videos.json");
	assert_eq!(received.content_type, "application/x-www-form-urlencoded");
	assert_eq!(
		param(&received, "source_url"),
		Some("http://example.com/clip.mp4")
	);
	assert_eq!(param(&received, "profiles"), Some("h264,webm"));
	assert_eq!(param(&received, "payload"), Some("a*b c"));
}

#[tokio::test]
async fn test_encode_video_file_uploads_multipart() {
	let file_path = std::env::temp_dir().join(format!("panda-api-test-{}.mp4", std::process::id()));
	std::fs::write(&file_path, b"not really a video").unwrap();

	let server = serve(201, r#"{"id":"v10"}"#).await;
	let video = server
		.api
		.encode_video_file(&file_path, &EncodeOptions::default())
		.await;
	let signer = server.signer.clone();
	let received = server.received().await;
	std::fs::remove_file(&file_path).ok();

	assert_eq!(video.unwrap().id.as_deref(), Some("v10"));
	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/videos.json");
	assert!(received.content_type.starts_with("multipart/form-data"));
	assert!(received.body.contains("not really a video"));

	let mut fields = multipart_fields(&received);
	assert!(!fields.contains_key("file"));
	let signature = fields.remove(SIGNATURE_PARAM).unwrap();
	assert_eq!(signature, signer.signature("POST", "/videos.json", &fields));
}

#[tokio::test]
async fn test_register_upload() {
	let server = serve(
		200,
		r#"{"id":"u1","location":"http://uploads.example.com/u1"}"#,
	)
	.await;

	let session = server
		.api
		.register_upload("clip.mp4", 1024, &EncodeOptions::default())
		.await
		.unwrap();
	let received = server.received().await;

	assert_eq!(
		session.location.as_deref(),
		Some("http://uploads.example.com/u1")
	);
	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/videos/upload.json");
	assert_eq!(param(&received, "file_name"), Some("clip.mp4"));
	assert_eq!(param(&received, "file_size"), Some("1024"));
}

#[tokio::test]
async fn test_delete_video() {
	let server = serve(200, "").await;

	server.api.delete_video("v1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "DELETE");
	assert_eq!(received.path, "/v2/videos/v1.json");
}

#[tokio::test]
async fn test_delete_video_source() {
	let server = serve(200, "").await;

	server.api.delete_video_source("v1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "DELETE");
	assert_eq!(received.path, "/v2/videos/v1/source.json");
}

#[tokio::test]
async fn test_encodings_list_filter() {
	let server = serve(200, "[]").await;

	let filter = EncodingFilter {
		profile_name: Some("h264".to_string()),
		video_id: Some("v1".to_string()),
		..Default::default()
	};
	let encodings = server.api.encodings(&filter).await.unwrap();
	let received = server.received().await;

	assert!(encodings.is_empty());
	assert_eq!(received.path, "/v2/encodings.json");
	assert_eq!(param(&received, "profile_name"), Some("h264"));
	assert_eq!(param(&received, "video_id"), Some("v1"));
	assert_eq!(param(&received, "status"), None);
}

#[tokio::test]
async fn test_encoding_by_id() {
	let server = serve(200, r#"{"id":"e1","encoding_progress":40}"#).await;

	let encoding = server.api.encoding("e1").await.unwrap();
	let received = server.received().await;

	assert_eq!(encoding.id.as_deref(), Some("e1"));
	assert_eq!(received.method, "GET");
	assert_eq!(received.path, "/v2/encodings/e1.json");
}

#[tokio::test]
async fn test_create_encoding_by_profile_name() {
	let server = serve(201, r#"{"id":"e2","video_id":"v1","profile_name":"h264"}"#).await;

	let encoding = server
		.api
		.create_encoding("v1", &ProfileRef::Name("h264".to_string()))
		.await
		.unwrap();
	let received = server.received().await;

	assert_eq!(encoding.profile_name.as_deref(), Some("h264"));
	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/encodings.json");
	assert_eq!(param(&received, "video_id"), Some("v1"));
	assert_eq!(param(&received, "profile_name"), Some("h264"));
	assert_eq!(param(&received, "profile_id"), None);
}

#[tokio::test]
async fn test_cancel_encoding_is_post() {
	let server = serve(200, "").await;

	server.api.cancel_encoding("e1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/encodings/e1/cancel.json");
}

#[tokio::test]
async fn test_retry_encoding_is_post() {
	let server = serve(200, "").await;

	server.api.retry_encoding("e1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/encodings/e1/retry.json");
}

#[tokio::test]
async fn test_delete_encoding() {
	let server = serve(200, "").await;

	server.api.delete_encoding("e1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "DELETE");
	assert_eq!(received.path, "/v2/encodings/e1.json");
}

#[tokio::test]
async fn test_profiles_list() {
	let server = serve(200, r#"[{"id":"p1","name":"h264"}]"#).await;

	let profiles = server.api.profiles().await.unwrap();
	let received = server.received().await;

	assert_eq!(profiles[0].name.as_deref(), Some("h264"));
	assert_eq!(received.path, "/v2/profiles.json");
}

#[tokio::test]
async fn test_profile_by_name() {
	let server = serve(200, r#"{"id":"p1","name":"h264 hd"}"#).await;

	server.api.profile("h264 hd").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.path, "/v2/profiles/h264%20hd.json");
}

#[tokio::test]
async fn test_add_profile_sends_writable_fields() {
	let server = serve(201, r#"{"id":"p2","name":"small"}"#).await;

	let profile = Profile {
		id: Some("ignored".to_string()),
		name: Some("small".to_string()),
		width: Some(320),
		upscale: Some(false),
		..Default::default()
	};
	let created = server.api.add_profile(&profile).await.unwrap();
	let received = server.received().await;

	assert_eq!(created.id.as_deref(), Some("p2"));
	assert_eq!(received.method, "POST");
	assert_eq!(received.path, "/v2/profiles.json");
	assert_eq!(param(&received, "name"), Some("small"));
	assert_eq!(param(&received, "width"), Some("320"));
	assert_eq!(param(&received, "upscale"), Some("false"));
	assert_eq!(param(&received, "id"), None);
}

#[tokio::test]
async fn test_add_profile_from_preset() {
	let server = serve(201, r#"{"id":"p3","preset_name":"h264"}"#).await;

	server
		.api
		.add_profile_from_preset("h264", Some("mobile"))
		.await
		.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "POST");
	assert_eq!(param(&received, "preset_name"), Some("h264"));
	assert_eq!(param(&received, "name"), Some("mobile"));
}

#[tokio::test]
async fn test_update_profile_is_put_to_its_id() {
	let server = serve(200, r#"{"id":"p1","width":640}"#).await;

	let profile = Profile {
		id: Some("p1".to_string()),
		width: Some(640),
		..Default::default()
	};
	let updated = server.api.update_profile(&profile).await.unwrap();
	let received = server.received().await;

	assert_eq!(updated.width, Some(640));
	assert_eq!(received.method, "PUT");
	assert_eq!(received.path, "/v2/profiles/p1.json");
	assert_eq!(param(&received, "width"), Some("640"));
	assert_eq!(param(&received, "id"), None);
}

#[tokio::test]
async fn test_update_profile_without_id() {
	let server = serve(200, "{}").await;

	let result = server.api.update_profile(&Profile::default()).await;

	assert!(matches!(
		result,
		Err(PandaError::Model(ModelError::MissingId { model: "Profile" }))
	));
}

#[tokio::test]
async fn test_delete_profile() {
	let server = serve(200, "").await;

	server.api.delete_profile("p1").await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "DELETE");
	assert_eq!(received.path, "/v2/profiles/p1.json");
}

#[tokio::test]
async fn test_notifications() {
	let server = serve(
		200,
		r#"{"url":"http://example.com/hook","delay":5,"events":{"video_created":true}}"#,
	)
	.await;

	let notifications = server.api.notifications().await.unwrap();
	let received = server.received().await;

	assert_eq!(notifications.delay, Some(5));
	assert_eq!(notifications.events.video_created, Some(true));
	assert_eq!(received.method, "GET");
	assert_eq!(received.path, "/v2/notifications.json");
}

#[tokio::test]
async fn test_update_notifications_flattens_events() {
	let server = serve(200, r#"{"url":"http://example.com/hook"}"#).await;

	let update = Notifications {
		url: Some("http://example.com/hook".to_string()),
		delay: None,
		events: NotificationEvents {
			encoding_completed: Some(true),
			..Default::default()
		},
	};
	server.api.update_notifications(&update).await.unwrap();
	let received = server.received().await;

	assert_eq!(received.method, "PUT");
	assert_eq!(received.path, "/v2/notifications.json");
	assert_eq!(
		param(&received, "events[encoding_completed]"),
		Some("true")
	);
	assert_eq!(param(&received, "delay"), None);
}

#[tokio::test]
async fn test_api_error_envelope() {
	let server = serve(
		404,
		r#"{"error":"RecordNotFound","message":"Couldn't find Video"}"#,
	)
	.await;

	let result = server.api.video("missing").await;
	server.received().await;

	match result {
		Err(PandaError::Api {
			status,
			code,
			message,
		}) => {
			assert_eq!(status, 404);
			assert_eq!(code, "RecordNotFound");
			assert_eq!(message, "Couldn't find Video");
		}
		other => panic!("unexpected result: {:?}", other),
	}
}

#[tokio::test]
async fn test_unknown_response_field_is_reported() {
	let server = serve(200, r#"{"id":"v1","thumbnail_url":"x"}"#).await;

	let result = server.api.video("v1").await;
	server.received().await;

	assert!(matches!(
		result,
		Err(PandaError::Model(ModelError::UnknownField { ref field, model: "Video" }))
			if field == "thumbnail_url"
	));
}
