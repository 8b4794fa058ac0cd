mod course_notification_test;
