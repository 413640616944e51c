use std::collections::HashSet;

use gwb_cfn::builder::DeclarationBuilder;
use gwb_cfn::emitters::resource::ParentId;
use gwb_cfn::{Declaration, DeclarationBody, DeclarationKind};
use gwb_core::parse;
use gwb_core::parse::schema::ApiSchema;

fn schema(yaml: &str) -> ApiSchema {
    parse::from_yaml(yaml).expect("test schema should parse")
}

fn position(declarations: &[Declaration], logical_id: &str) -> usize {
    declarations
        .iter()
        .position(|d| d.logical_id == logical_id)
        .unwrap_or_else(|| panic!("{logical_id} should be declared"))
}

fn find<'a>(declarations: &'a [Declaration], logical_id: &str) -> &'a Declaration {
    &declarations[position(declarations, logical_id)]
}

#[test]
fn shared_prefix_resources_declared_once() {
    let schema = schema(
        "paths:\n  /store/orders:\n    get: {}\n  /store/items:\n    get: {}\n",
    );
    let mut builder = DeclarationBuilder::new();
    let declarations = builder.build(&schema);

    let store_count = declarations
        .iter()
        .filter(|d| d.logical_id == "ApiGatewayResourceStore")
        .count();
    assert_eq!(store_count, 1);
    assert_eq!(builder.created_resources().len(), 3);
    assert_eq!(builder.created_methods().len(), 2);
}

#[test]
fn parents_precede_children() {
    let schema = schema("paths:\n  /a/b/c:\n    get: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    assert!(
        position(&declarations, "ApiGatewayResourceA")
            < position(&declarations, "ApiGatewayResourceAB")
    );
    assert!(
        position(&declarations, "ApiGatewayResourceAB")
            < position(&declarations, "ApiGatewayResourceABC")
    );
}

#[test]
fn first_segment_hangs_off_the_root() {
    let schema = schema("paths:\n  /a/b:\n    get: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Resource(body) = &find(&declarations, "ApiGatewayResourceA").body
    else {
        panic!("expected a resource body");
    };
    assert!(matches!(body.properties.parent_id, ParentId::Root(_)));
    assert_eq!(body.properties.path_part, "a");

    let DeclarationBody::Resource(body) = &find(&declarations, "ApiGatewayResourceAB").body
    else {
        panic!("expected a resource body");
    };
    match &body.properties.parent_id {
        ParentId::Resource(parent) => assert_eq!(parent, "!Ref ApiGatewayResourceA"),
        ParentId::Root(_) => panic!("nested segment should not hang off the root"),
    }
    assert_eq!(body.properties.path_part, "b");
}

#[test]
fn shared_ancestor_wires_later_children() {
    // /store declares the ancestor; /store/orders still parents onto it.
    let schema = schema("paths:\n  /store:\n    get: {}\n  /store/orders:\n    get: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Resource(body) =
        &find(&declarations, "ApiGatewayResourceStoreOrders").body
    else {
        panic!("expected a resource body");
    };
    match &body.properties.parent_id {
        ParentId::Resource(parent) => assert_eq!(parent, "!Ref ApiGatewayResourceStore"),
        ParentId::Root(_) => panic!("nested segment should not hang off the root"),
    }
}

#[test]
fn braced_segment_keeps_braces_in_path_part() {
    let schema = schema("paths:\n  /session/{sessionId}:\n    get: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Resource(body) =
        &find(&declarations, "ApiGatewayResourceSessionSessionId").body
    else {
        panic!("expected a resource body");
    };
    assert_eq!(body.properties.path_part, "{sessionId}");
}

#[test]
fn methods_for_exactly_the_defined_verbs() {
    let schema = schema("paths:\n  /local/id:\n    get: {}\n    post: {}\n");
    let mut builder = DeclarationBuilder::new();
    let declarations = builder.build(&schema);

    let methods: Vec<&str> = declarations
        .iter()
        .filter(|d| d.kind == DeclarationKind::Method)
        .map(|d| d.logical_id.as_str())
        .collect();
    assert_eq!(
        methods,
        ["ApiGatewayMethodLocalIdGet", "ApiGatewayMethodLocalIdPost"]
    );
    assert_eq!(builder.created_methods().len(), 2);
    assert!(!declarations.iter().any(|d| d.kind == DeclarationKind::Cors));
}

#[test]
fn method_body_carries_verb_resource_and_uri() {
    let schema = schema("paths:\n  /session:\n    put: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Method(body) = &find(&declarations, "ApiGatewayMethodSessionPut").body
    else {
        panic!("expected a method body");
    };
    let properties = &body.properties;
    assert_eq!(body.resource_type, "AWS::ApiGateway::Method");
    assert_eq!(properties.http_method, "PUT");
    assert_eq!(properties.integration.integration_http_method, "PUT");
    assert_eq!(properties.integration.integration_type, "HTTP_PROXY");
    assert_eq!(
        properties.integration.uri,
        "!Sub '${TargetDomain}/api/session'"
    );
    assert_eq!(properties.resource_id, "!Ref ApiGatewayResourceSession");
    assert_eq!(properties.authorization_type, "NONE");
}

#[test]
fn security_list_toggles_api_key() {
    let schema = schema(
        "paths:\n  /local/id:\n    get:\n      security: [true]\n    post: {}\n",
    );
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Method(get) = &find(&declarations, "ApiGatewayMethodLocalIdGet").body
    else {
        panic!("expected a method body");
    };
    assert_eq!(get.properties.api_key_required, "true");

    let DeclarationBody::Method(post) = &find(&declarations, "ApiGatewayMethodLocalIdPost").body
    else {
        panic!("expected a method body");
    };
    assert_eq!(post.properties.api_key_required, "false");
}

#[test]
fn path_parameters_map_to_request_and_integration() {
    let schema = schema(
        "paths:\n  /local/id:\n    get:\n      parameters:\n        - name: id\n          in: path\n          required: true\n",
    );
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Method(body) = &find(&declarations, "ApiGatewayMethodLocalIdGet").body
    else {
        panic!("expected a method body");
    };
    let properties = &body.properties;

    let request = properties
        .request_parameters
        .as_ref()
        .expect("request parameters should be present");
    assert_eq!(request.get("method.request.path.id"), Some(&true));

    let integration = properties
        .integration
        .request_parameters
        .as_ref()
        .expect("integration parameters should be present");
    assert_eq!(
        integration.get("integration.request.path.id"),
        Some(&"method.request.path.id".to_string())
    );
}

#[test]
fn unmappable_parameters_omit_the_blocks() {
    // Parameters exist but none has a recognized location: same outcome as
    // no parameters at all.
    let schema = schema(
        "paths:\n  /local/id:\n    get:\n      parameters:\n        - name: page\n          in: query\n        - in: path\n",
    );
    let declarations = DeclarationBuilder::new().build(&schema);

    let DeclarationBody::Method(body) = &find(&declarations, "ApiGatewayMethodLocalIdGet").body
    else {
        panic!("expected a method body");
    };
    assert!(body.properties.request_parameters.is_none());
    assert!(body.properties.integration.request_parameters.is_none());
}

#[test]
fn cors_aggregates_defined_verbs() {
    let schema = schema(
        "paths:\n  /session:\n    get: {}\n    post: {}\n    x-allow-cors: true\n",
    );
    let declarations = DeclarationBuilder::new().build(&schema);

    let cors = find(&declarations, "ApiGatewayMethodSessionOptions");
    assert_eq!(cors.kind, DeclarationKind::Cors);

    let DeclarationBody::Cors(body) = &cors.body else {
        panic!("expected a cors body");
    };
    let response = &body.properties.integration.integration_responses[0];
    let allow = response
        .response_parameters
        .get("method.response.header.Access-Control-Allow-Methods")
        .expect("allow-methods header should be present");

    let verbs: HashSet<&str> = allow.trim_matches('\'').split(',').collect();
    assert_eq!(verbs, HashSet::from(["OPTIONS", "GET", "POST"]));
}

#[test]
fn cors_emitted_even_without_verbs() {
    let schema = schema("paths:\n  /ping:\n    x-allow-cors: true\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    assert!(!declarations.iter().any(|d| d.kind == DeclarationKind::Method));

    let cors = find(&declarations, "ApiGatewayMethodPingOptions");
    let DeclarationBody::Cors(body) = &cors.body else {
        panic!("expected a cors body");
    };
    let response = &body.properties.integration.integration_responses[0];
    assert_eq!(
        response
            .response_parameters
            .get("method.response.header.Access-Control-Allow-Methods"),
        Some(&"'OPTIONS'".to_string())
    );
    assert_eq!(body.properties.http_method, "OPTIONS");
    assert_eq!(body.properties.integration.integration_type, "MOCK");
}

#[test]
fn root_path_produces_methods_without_resources() {
    let schema = schema("paths:\n  /:\n    get: {}\n");
    let declarations = DeclarationBuilder::new().build(&schema);

    assert!(!declarations.iter().any(|d| d.kind == DeclarationKind::Resource));
    let method = find(&declarations, "ApiGatewayMethodGet");
    assert_eq!(method.kind, DeclarationKind::Method);
}

#[test]
fn fragments_parse_back_as_yaml_mappings() {
    let schema = schema(
        "paths:\n  /session/{sessionId}:\n    get:\n      parameters:\n        - name: sessionId\n          in: path\n          required: true\n    x-allow-cors: true\n",
    );
    let declarations = DeclarationBuilder::new().build(&schema);
    assert!(!declarations.is_empty());

    for declaration in &declarations {
        let fragment = declaration.to_fragment().expect("fragment should serialize");
        let value: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(&fragment).expect("fragment should parse back");

        let body = value
            .get(declaration.logical_id.as_str())
            .expect("fragment should be keyed by logical id");
        let type_name = body.get("Type").and_then(|t| t.as_str()).unwrap();
        match declaration.kind {
            DeclarationKind::Resource => assert_eq!(type_name, "AWS::ApiGateway::Resource"),
            DeclarationKind::Method | DeclarationKind::Cors => {
                assert_eq!(type_name, "AWS::ApiGateway::Method")
            }
        }
        assert!(body.get("Properties").is_some());
    }
}
