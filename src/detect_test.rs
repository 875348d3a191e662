use super::*;

fn request() -> RequestContext<'static> {
    RequestContext {
        method: "GET",
        ..RequestContext::default()
    }
}

mod detect_origin {
    use super::*;

    #[test]
    fn when_origin_and_referer_differ_should_prefer_origin() {
        // Arrange
        let ctx = RequestContext {
            origin: Some("https://app.example.com"),
            referer: Some("https://other.example.com/page"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("https://app.example.com"));
    }

    #[test]
    fn when_only_referer_present_should_strip_to_origin_form() {
        // Arrange
        let ctx = RequestContext {
            referer: Some("http://192.168.0.12:8080/rma/track?id=RMA-1"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("http://192.168.0.12:8080"));
    }

    #[test]
    fn when_only_host_with_forwarded_https_should_build_https_origin() {
        // Arrange
        let ctx = RequestContext {
            host: Some("rma.example.com"),
            forwarded_proto: Some("https"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("https://rma.example.com"));
    }

    #[test]
    fn when_forwarded_proto_is_a_list_should_use_first_entry() {
        // Arrange
        let ctx = RequestContext {
            host: Some("rma.example.com"),
            forwarded_proto: Some("https, http"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("https://rma.example.com"));
    }

    #[test]
    fn when_only_host_over_tls_should_infer_https() {
        // Arrange
        let ctx = RequestContext {
            host: Some("rma.example.com:8443"),
            encrypted: true,
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("https://rma.example.com:8443"));
    }

    #[test]
    fn when_only_host_over_plain_connection_should_infer_http() {
        // Arrange
        let ctx = RequestContext {
            host: Some("localhost:3000"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx).as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn when_no_headers_present_should_return_none() {
        // Arrange & Act & Assert
        assert_eq!(detect_origin(&request()), None);
    }

    #[test]
    fn when_origin_malformed_should_return_none_without_falling_through() {
        // Arrange
        let ctx = RequestContext {
            origin: Some("not a url"),
            referer: Some("https://other.example.com/page"),
            host: Some("rma.example.com"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx), None);
    }

    #[test]
    fn when_origin_is_null_should_return_none() {
        // Arrange
        let ctx = RequestContext {
            origin: Some("null"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx), None);
    }

    #[test]
    fn when_referer_is_opaque_should_return_none() {
        // Arrange
        let ctx = RequestContext {
            referer: Some("data:text/plain,hello"),
            ..request()
        };

        // Act & Assert
        assert_eq!(detect_origin(&ctx), None);
    }
}

mod request_origin {
    use super::*;

    #[test]
    fn when_origin_valid_should_return_header_as_sent() {
        // Arrange
        let ctx = RequestContext {
            origin: Some("http://localhost:8080"),
            ..request()
        };

        // Act & Assert
        assert_eq!(request_origin(&ctx), Some("http://localhost:8080"));
    }

    #[test]
    fn when_origin_malformed_should_treat_as_absent() {
        // Arrange
        let ctx = RequestContext {
            origin: Some("::::"),
            ..request()
        };

        // Act & Assert
        assert_eq!(request_origin(&ctx), None);
    }

    #[test]
    fn when_only_referer_present_should_return_none() {
        // Arrange
        let ctx = RequestContext {
            referer: Some("https://app.example.com/form"),
            ..request()
        };

        // Act & Assert
        assert_eq!(request_origin(&ctx), None);
    }
}

mod is_web_origin {
    use super::*;

    #[test]
    fn when_scheme_http_or_https_should_accept() {
        assert!(is_web_origin("http://localhost:8080"));
        assert!(is_web_origin("https://example.com"));
    }

    #[test]
    fn when_scheme_other_or_unparsable_should_reject() {
        assert!(!is_web_origin("ftp://example.com"));
        assert!(!is_web_origin("mailto:ops@example.com"));
        assert!(!is_web_origin("example.com"));
        assert!(!is_web_origin(""));
    }
}
