//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Soft-deletable
//! tables carry a nullable `deleted_at`; their unique indexes only cover live
//! rows.

diesel::table! {
    /// Registered accounts. `password_hash` never leaves the adapter.
    users (id) {
        id -> Uuid,
        email -> Text,
        display_name -> Text,
        avatar_url -> Nullable<Text>,
        bio -> Nullable<Text>,
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    communities (id) {
        id -> Uuid,
        name -> Text,
        slug -> Text,
        logo_url -> Nullable<Text>,
        primary_color -> Nullable<Text>,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    memberships (id) {
        id -> Uuid,
        community_id -> Uuid,
        user_id -> Uuid,
        role -> Text,
        tier_id -> Nullable<Uuid>,
        joined_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    spaces (id) {
        id -> Uuid,
        community_id -> Uuid,
        name -> Text,
        slug -> Text,
        description -> Nullable<Text>,
        visibility -> Text,
        position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    channels (id) {
        id -> Uuid,
        space_id -> Uuid,
        community_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        kind -> Text,
        position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    posts (id) {
        id -> Uuid,
        channel_id -> Uuid,
        community_id -> Uuid,
        author_id -> Uuid,
        title -> Text,
        content -> Text,
        comment_count -> Int4,
        like_count -> Int4,
        pinned -> Bool,
        archived -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    comments (id) {
        id -> Uuid,
        post_id -> Uuid,
        author_id -> Uuid,
        parent_id -> Nullable<Uuid>,
        content -> Text,
        like_count -> Int4,
        reply_count -> Int4,
        archived -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only revision history of posts and lessons.
    content_versions (id) {
        id -> Uuid,
        content_id -> Uuid,
        content_kind -> Text,
        version -> Int4,
        title -> Nullable<Text>,
        body -> Text,
        editor_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Uuid,
        community_id -> Uuid,
        title -> Text,
        description -> Nullable<Text>,
        cover_image_url -> Nullable<Text>,
        status -> Text,
        required_tier_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    lessons (id) {
        id -> Uuid,
        course_id -> Uuid,
        title -> Text,
        content -> Text,
        video_url -> Nullable<Text>,
        position -> Int4,
        duration_minutes -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    progress (id) {
        id -> Uuid,
        course_id -> Uuid,
        user_id -> Uuid,
        completed_lesson_ids -> Array<Uuid>,
        completion_percentage -> Int2,
        started_at -> Timestamptz,
        updated_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    certificates (id) {
        id -> Uuid,
        course_id -> Uuid,
        user_id -> Uuid,
        verification_code -> Text,
        issued_at -> Timestamptz,
    }
}

diesel::table! {
    payment_tiers (id) {
        id -> Uuid,
        community_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        price_cents -> Int8,
        currency -> Text,
        billing_interval -> Text,
        features -> Array<Text>,
        active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    checkout_sessions (id) {
        id -> Uuid,
        tier_id -> Uuid,
        community_id -> Uuid,
        user_id -> Uuid,
        amount_cents -> Int8,
        currency -> Text,
        status -> Text,
        provider_reference -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        community_id -> Nullable<Uuid>,
        kind -> Text,
        title -> Text,
        body -> Text,
        link -> Nullable<Text>,
        read_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(memberships -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    communities,
    memberships,
    spaces,
    channels,
    posts,
    comments,
    content_versions,
    courses,
    lessons,
    progress,
    certificates,
    payment_tiers,
    checkout_sessions,
    notifications,
);
