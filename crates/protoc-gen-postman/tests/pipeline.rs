//! End-to-end tests: descriptor fixtures in, collection JSON out.
//!
//! Each test builds a minimal plugin request in code, runs it through
//! [`protoc_gen_postman::plugin`] or [`protoc_gen_postman::build_collection`],
//! and checks the decoded document.

use pretty_assertions::assert_eq;
use prost::Message as _;
use prost_types::compiler::CodeGeneratorResponse;
use serde_json::{json, Value};

use protoc_gen_postman::descriptor::{
    field_type, CodeGeneratorRequest, DescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileOptions, HttpPattern, HttpRule, Location, MethodDescriptorProto, MethodOptions,
    ServiceDescriptorProto, SourceCodeInfo, LABEL_REPEATED,
};
use protoc_gen_postman::{build_collection, plugin, Collection, CollectionConfig, Error};

fn field(name: &str, type_id: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        label: Some(1),
        r#type: Some(type_id),
        type_name: None,
    }
}

fn message_field(name: &str, type_name: &str, repeated: bool) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        label: Some(if repeated { LABEL_REPEATED } else { 1 }),
        r#type: Some(field_type::MESSAGE),
        type_name: Some(type_name.to_string()),
    }
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        nested_type: vec![],
        options: None,
    }
}

fn method(name: &str, input: &str, pattern: Option<HttpPattern>) -> MethodDescriptorProto {
    let options = pattern.map(|pattern| {
        MethodOptions {
            http: Some(HttpRule {
                pattern: Some(pattern),
                body: String::new(),
            }),
        }
        .encode_to_vec()
    });
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(input.to_string()),
        output_type: Some(".google.protobuf.Empty".to_string()),
        options,
        client_streaming: None,
        server_streaming: None,
    }
}

/// `items/v1/items.proto` with one `ItemService`.
fn items_file(methods: Vec<MethodDescriptorProto>, comments: Vec<(usize, &str)>) -> FileDescriptorProto {
    let location = comments
        .into_iter()
        .map(|(method_index, text)| Location {
            path: vec![6, 0, 2, i32::try_from(method_index).unwrap()],
            leading_comments: Some(text.to_string()),
        })
        .collect();

    FileDescriptorProto {
        name: Some("items/v1/items.proto".to_string()),
        package: Some("items.v1".to_string()),
        message_type: vec![
            message(
                "ItemRequest",
                vec![field("id", field_type::INT32), field("name", field_type::STRING)],
            ),
            message("CreateItemRequest", vec![field("id", field_type::INT32)]),
        ],
        service: vec![ServiceDescriptorProto {
            name: Some("ItemService".to_string()),
            method: methods,
        }],
        options: Some(FileOptions {
            go_package: Some("example.com/items/v1;itemsv1".to_string()),
        }),
        source_code_info: Some(SourceCodeInfo { location }),
    }
}

fn config() -> CollectionConfig {
    CollectionConfig::new().document_name("version.test")
}

fn generate(files: &[FileDescriptorProto]) -> Value {
    let targets: Vec<String> = files.iter().filter_map(|f| f.name.clone()).collect();
    let collection = build_collection(files, &targets, &config()).expect("generation should succeed");
    serde_json::to_value(&collection).expect("collection serializes")
}

/// The first leaf request of the first service of the first package.
fn first_leaf(doc: &Value) -> &Value {
    &doc["item"][0]["item"][0]["item"][0]
}

#[test]
fn get_request_flattens_into_query_string() {
    let files = [items_file(
        vec![method(
            "ListItems",
            ".items.v1.ItemRequest",
            Some(HttpPattern::Get("/v1/items".to_string())),
        )],
        vec![],
    )];
    let doc = generate(&files);
    let leaf = first_leaf(&doc);

    assert_eq!(leaf["name"], "ListItems()");
    assert_eq!(leaf["request"]["method"], "GET");
    assert_eq!(
        leaf["request"]["url"],
        json!({
            "raw": "{{domain}}/v1/items?id=0&name=",
            "host": ["{{domain}}"],
            "path": ["v1", "items"],
            "query": [
                {"key": "id", "value": "0"},
                {"key": "name", "value": ""}
            ]
        })
    );
    assert!(leaf["request"].get("body").is_none());
}

#[test]
fn post_request_embeds_pretty_json_body() {
    let files = [items_file(
        vec![method(
            "CreateItem",
            ".items.v1.CreateItemRequest",
            Some(HttpPattern::Post("/v1/items".to_string())),
        )],
        vec![],
    )];
    let doc = generate(&files);
    let request = &first_leaf(&doc)["request"];

    assert_eq!(request["method"], "POST");
    assert_eq!(request["url"]["raw"], "{{domain}}/v1/items");
    assert_eq!(request["url"]["path"], json!(["v1", "items"]));
    assert!(request["url"].get("query").is_none());
    assert_eq!(
        request["body"],
        json!({
            "mode": "raw",
            "raw": "{\n    \"id\": 0\n}",
            "options": {"raw": {"language": "json"}}
        })
    );
}

#[test]
fn comment_sets_description_and_headers() {
    let files = [items_file(
        vec![method(
            "CreateItem",
            ".items.v1.CreateItemRequest",
            Some(HttpPattern::Post("/v1/items".to_string())),
        )],
        vec![(0, "Creates an item\n@reqMetadata *token")],
    )];
    let doc = generate(&files);
    let leaf = first_leaf(&doc);

    assert_eq!(leaf["name"], "CreateItem(Creates an item)");
    assert_eq!(
        leaf["request"]["header"],
        json!([{"key": "Grpc-Metadata-token", "value": "token", "type": "text"}])
    );
}

#[test]
fn static_headers_follow_comment_headers() {
    let files = [items_file(
        vec![method(
            "CreateItem",
            ".items.v1.CreateItemRequest",
            Some(HttpPattern::Post("/v1/items".to_string())),
        )],
        vec![(0, "@reqMetadata tenant")],
    )];
    let targets = vec!["items/v1/items.proto".to_string()];
    let config = config().static_header("Authorization", "Bearer {{token}}");
    let collection = build_collection(&files, &targets, &config).unwrap();
    let doc = serde_json::to_value(&collection).unwrap();

    let keys: Vec<&str> = first_leaf(&doc)["request"]["header"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Grpc-Metadata-tenant", "Authorization"]);
}

#[test]
fn method_without_binding_falls_back_to_post_empty_path() {
    let files = [items_file(
        vec![method("Sync", ".items.v1.CreateItemRequest", None)],
        vec![],
    )];
    let doc = generate(&files);
    let request = &first_leaf(&doc)["request"];

    assert_eq!(request["method"], "POST");
    assert_eq!(request["url"]["raw"], "{{domain}}");
    assert_eq!(request["url"]["path"], json!([""]));
}

#[test]
fn empty_get_path_falls_back_to_post() {
    let files = [items_file(
        vec![method(
            "ListItems",
            ".items.v1.ItemRequest",
            Some(HttpPattern::Get(String::new())),
        )],
        vec![],
    )];
    let doc = generate(&files);
    let request = &first_leaf(&doc)["request"];

    assert_eq!(request["method"], "POST");
    assert_eq!(request["url"]["raw"], "{{domain}}");
    assert!(request["url"].get("query").is_none());
}

#[test]
fn snake_case_names_are_camel_cased() {
    let mut file = items_file(
        vec![method(
            "get_item",
            ".items.v1.ItemRequest",
            Some(HttpPattern::Get("/v1/items/{id}".to_string())),
        )],
        vec![],
    );
    file.service[0].name = Some("item_service".to_string());
    let doc = generate(&[file]);

    assert_eq!(doc["item"][0]["item"][0]["name"], "ItemService");
    assert_eq!(first_leaf(&doc)["name"], "GetItem()");
}

#[test]
fn folders_follow_package_then_service() {
    let files = [items_file(
        vec![
            method(
                "ListItems",
                ".items.v1.ItemRequest",
                Some(HttpPattern::Get("/v1/items".to_string())),
            ),
            method(
                "CreateItem",
                ".items.v1.CreateItemRequest",
                Some(HttpPattern::Post("/v1/items".to_string())),
            ),
        ],
        vec![],
    )];
    let doc = generate(&files);

    assert_eq!(doc["info"]["name"], "version.test");
    assert_eq!(
        doc["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    );
    assert_eq!(doc["item"][0]["name"], "itemsv1");
    assert!(doc["item"][0].get("request").is_none());
    assert_eq!(doc["item"][0]["item"][0]["name"], "ItemService");

    let names: Vec<&str> = doc["item"][0]["item"][0]["item"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ListItems()", "CreateItem()"]);
}

#[test]
fn nested_get_fields_use_dotted_keys_and_cross_file_types() {
    let common = FileDescriptorProto {
        name: Some("common/page.proto".to_string()),
        package: Some("common".to_string()),
        message_type: vec![message(
            "Page",
            vec![field("size", field_type::UINT32), field("token", field_type::STRING)],
        )],
        ..Default::default()
    };
    let search = FileDescriptorProto {
        name: Some("search.proto".to_string()),
        package: Some("search.v1".to_string()),
        message_type: vec![message(
            "SearchRequest",
            vec![
                field("q", field_type::STRING),
                message_field("page", ".common.Page", false),
                FieldDescriptorProto {
                    label: Some(LABEL_REPEATED),
                    ..field("tags", field_type::STRING)
                },
            ],
        )],
        service: vec![ServiceDescriptorProto {
            name: Some("SearchService".to_string()),
            method: vec![method(
                "Search",
                ".search.v1.SearchRequest",
                Some(HttpPattern::Get("/v1/search".to_string())),
            )],
        }],
        ..Default::default()
    };

    // Only search.proto is generated; common/page.proto is an import.
    let files = [common, search];
    let targets = vec!["search.proto".to_string()];
    let collection = build_collection(&files, &targets, &config()).unwrap();
    let doc = serde_json::to_value(&collection).unwrap();

    assert_eq!(doc["item"].as_array().unwrap().len(), 1);
    assert_eq!(doc["item"][0]["name"], "search_v1");
    assert_eq!(
        first_leaf(&doc)["request"]["url"]["raw"],
        "{{domain}}/v1/search?q=&page.size=0&page.token=&tags=[]"
    );
}

#[test]
fn self_referential_input_terminates() {
    let file = FileDescriptorProto {
        name: Some("tree.proto".to_string()),
        package: Some("tree.v1".to_string()),
        message_type: vec![message(
            "Node",
            vec![
                field("label", field_type::STRING),
                message_field("parent", ".tree.v1.Node", false),
            ],
        )],
        service: vec![ServiceDescriptorProto {
            name: Some("TreeService".to_string()),
            method: vec![method(
                "Walk",
                ".tree.v1.Node",
                Some(HttpPattern::Get("/v1/tree".to_string())),
            )],
        }],
        ..Default::default()
    };
    let doc = generate(&[file]);

    assert_eq!(
        first_leaf(&doc)["request"]["url"]["raw"],
        "{{domain}}/v1/tree?label=&parent.label=&parent.parent.label=&parent.parent.parent.label="
    );
}

#[test]
fn unknown_input_type_is_an_error() {
    let files = [items_file(
        vec![method(
            "Ghost",
            ".items.v1.Missing",
            Some(HttpPattern::Post("/v1/ghost".to_string())),
        )],
        vec![],
    )];
    let targets = vec!["items/v1/items.proto".to_string()];
    let err = build_collection(&files, &targets, &config()).unwrap_err();

    assert!(
        matches!(err, Error::UnknownMessage { ref type_name, .. } if type_name == ".items.v1.Missing"),
        "unexpected error: {err}"
    );
}

#[test]
fn malformed_method_options_abort_generation() {
    let mut broken = method("Broken", ".items.v1.CreateItemRequest", None);
    broken.options = Some(vec![0x0a, 0xff, 0x01]);
    let files = [items_file(
        vec![
            method(
                "CreateItem",
                ".items.v1.CreateItemRequest",
                Some(HttpPattern::Post("/v1/items".to_string())),
            ),
            broken,
        ],
        vec![],
    )];
    let targets = vec!["items/v1/items.proto".to_string()];
    let err = build_collection(&files, &targets, &config()).unwrap_err();

    assert!(
        matches!(err, Error::MissingAnnotation { ref method, .. } if method == "items.v1.ItemService.Broken"),
        "unexpected error: {err}"
    );
}

#[test]
fn collection_json_round_trip() {
    let files = [items_file(
        vec![
            method(
                "ListItems",
                ".items.v1.ItemRequest",
                Some(HttpPattern::Get("/v1/items".to_string())),
            ),
            method(
                "CreateItem",
                ".items.v1.CreateItemRequest",
                Some(HttpPattern::Post("/v1/items".to_string())),
            ),
        ],
        vec![(1, "Creates an item\n@reqMetadata *token")],
    )];
    let targets = vec!["items/v1/items.proto".to_string()];
    let collection = build_collection(&files, &targets, &config()).unwrap();

    let json = serde_json::to_string(&collection).unwrap();
    let parsed: Collection = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, collection);
}

#[test]
fn plugin_round_trip_through_protocol_bytes() {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["items/v1/items.proto".to_string()],
        parameter: Some("output=items.postman_collection.json,name=Items,domain=base_url".to_string()),
        proto_file: vec![items_file(
            vec![method(
                "CreateItem",
                ".items.v1.CreateItemRequest",
                Some(HttpPattern::Post("/v1/items".to_string())),
            )],
            vec![],
        )],
    };

    let bytes = plugin::run(&request.encode_to_vec(), CollectionConfig::new()).unwrap();
    let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();

    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    assert_eq!(response.file.len(), 1);
    let file = &response.file[0];
    assert_eq!(file.name.as_deref(), Some("items.postman_collection.json"));

    let doc: Value = serde_json::from_str(file.content.as_deref().unwrap()).unwrap();
    assert_eq!(doc["info"]["name"], "Items");
    assert_eq!(first_leaf(&doc)["request"]["url"]["raw"], "{{base_url}}/v1/items");
    assert_eq!(first_leaf(&doc)["request"]["url"]["host"], json!(["{{base_url}}"]));
}

#[test]
fn plugin_reports_generation_errors_in_response() {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["items/v1/items.proto".to_string()],
        parameter: None,
        proto_file: vec![items_file(
            vec![method(
                "Ghost",
                ".items.v1.Missing",
                Some(HttpPattern::Post("/v1/ghost".to_string())),
            )],
            vec![],
        )],
    };

    let bytes = plugin::run(&request.encode_to_vec(), CollectionConfig::new()).unwrap();
    let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();

    assert!(response.file.is_empty());
    assert!(response.error.unwrap().contains(".items.v1.Missing"));
}

#[test]
fn default_output_name_and_version_stamp() {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["items/v1/items.proto".to_string()],
        parameter: None,
        proto_file: vec![items_file(vec![], vec![])],
    };

    let response = plugin::respond(&request, CollectionConfig::new()).unwrap();
    let file = &response.file[0];
    assert_eq!(file.name.as_deref(), Some("./source.postman_collection.json"));

    let doc: Value = serde_json::from_str(file.content.as_deref().unwrap()).unwrap();
    let name = doc["info"]["name"].as_str().unwrap();
    assert!(name.starts_with("version."), "got {name}");
    assert_eq!(doc["item"][0]["item"][0]["name"], "ItemService");
    assert!(doc["item"][0]["item"][0].get("item").is_none());
}
